/*!
 * # grimoire
 *
 * A Rust toolkit for D&D 5e spell data: scraping the public 5eTools mirror
 * and machine-translating spell documents while preserving embedded markup.
 *
 * ## Features
 *
 * - Scrape and aggregate spell JSON files from the 5eTools GitHub mirror
 * - Translate every prose field of a spell document tree via DeepL
 * - Protect markup tokens (`[[...]]`, `{@...}`, `@item.level`, `3d8`,
 *   `/save`) across the translation round trip
 * - Memoize translations in a durable content-addressed cache
 * - Batch provider calls with a fixed rate-limit pause
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The token-safe translation core:
 *   - `translation::normalize`: Whitespace normalization
 *   - `translation::tokens`: Placeholder protection and restoration
 *   - `translation::cache`: Durable translation cache
 *   - `translation::batch`: Sequential batch orchestration
 * - `providers`: Translation provider clients (DeepL, mock)
 * - `document`: Segment collection and reinjection over spell JSON trees
 * - `postprocess`: Post-translation enum/status/glossary fixups
 * - `scrape`: 5eTools mirror scraping and CSV flattening
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod postprocess;
pub mod providers;
pub mod scrape;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, CacheError, ProviderError, TranslationError};
pub use providers::Provider;
pub use translation::{BatchOptions, BatchTranslator, TranslationCache};
