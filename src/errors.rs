/*!
 * Error types for the grimoire application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while persisting the translation cache store
#[derive(Error, Debug)]
pub enum CacheError {
    /// Error serializing the store to JSON
    #[error("Failed to serialize cache store: {0}")]
    Serialize(String),

    /// Error writing the store to disk
    #[error("Failed to write cache store to {path}: {message}")]
    Persist {
        /// Store file path
        path: String,
        /// Underlying IO error message
        message: String,
    },
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the cache store
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// The provider returned a different number of results than requested.
    /// Positional pairing would silently misalign, so this is fatal.
    #[error("Provider returned {received} translations for a batch of {expected} (batch {batch_index})")]
    BatchCountMismatch {
        /// Zero-based index of the offending batch
        batch_index: usize,
        /// Number of segments submitted
        expected: usize,
        /// Number of translations received
        received: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the cache store
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
