/*!
 * Provider implementations for translation services.
 *
 * This module contains client implementations for translation providers:
 * - DeepL: batch machine translation over HTTP
 * - Mock: deterministic in-crate provider for tests
 */

use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for batch translation providers.
///
/// Implementations must return translations in the same order and count as
/// the submitted texts; the orchestration layer treats a count mismatch as
/// fatal rather than pairing results heuristically.
pub trait Provider: Debug {
    /// Stable identifier for this provider, used in cache keys and logs
    fn name(&self) -> &str;

    /// Translate a batch of texts from `source_lang` to `target_lang`
    ///
    /// # Arguments
    /// * `texts` - The texts to translate, already normalized and shielded
    /// * `source_lang` - Source language code as the provider expects it
    /// * `target_lang` - Target language code
    ///
    /// # Returns
    /// * `Result<Vec<String>, ProviderError>` - Translations in submission order
    fn translate_batch(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<String>, ProviderError>;
}

pub mod deepl;
pub mod mock;
