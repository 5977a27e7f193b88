/*!
 * Token-safe translation with a durable cache.
 *
 * The submodules form a small pipeline with one correctness contract:
 * - `normalize`: whitespace normalization ahead of protection and caching
 * - `tokens`: placeholder protection for markup that must not be translated
 * - `cache`: content-addressed durable memoization of provider results
 * - `batch`: sequential orchestration of the above against a provider
 */

pub mod batch;
pub mod cache;
pub mod normalize;
pub mod tokens;

pub use batch::{BatchOptions, BatchTranslator};
pub use cache::{TranslationCache, cache_key};
pub use normalize::normalize_whitespace;
pub use tokens::{ProtectedToken, TokenClass, protect, restore};
