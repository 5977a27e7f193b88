/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with tagged translations
 * - `MockProvider::uppercase()` - Succeeds by case-folding the input
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::short_count()` - Drops the last result from each batch
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, prefixing each text with the target language
    Working,
    /// Succeeds but uppercases everything, like a case-folding provider
    Uppercase,
    /// Always fails with an API error
    Failing,
    /// Returns one fewer result than requested
    ShortCount,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate_batch calls, shared across clones
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that uppercases its input
    pub fn uppercase() -> Self {
        Self::new(MockBehavior::Uppercase)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns one fewer result than requested
    pub fn short_count() -> Self {
        Self::new(MockBehavior::ShortCount)
    }

    /// Number of translate_batch calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
        }
    }
}

impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn translate_batch(
        &self,
        texts: &[String],
        _source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<String>, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(texts
                .iter()
                .map(|text| format!("[{target_lang}] {text}"))
                .collect()),

            MockBehavior::Uppercase => Ok(texts.iter().map(|text| text.to_uppercase()).collect()),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::ShortCount => {
                let mut results: Vec<String> = texts
                    .iter()
                    .map(|text| format!("[{target_lang}] {text}"))
                    .collect();
                results.pop();
                Ok(results)
            }
        }
    }
}
