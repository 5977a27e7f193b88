/*!
 * Translation caching functionality.
 *
 * Completed translations are memoized in a durable store so identical
 * segments never hit the provider twice across runs. The store is a single
 * JSON object (key to translated text) loaded wholesale at startup and
 * rewritten wholesale after each batch. Entries are append-only within a
 * run and are never invalidated automatically; deleting the store file is
 * the way to force re-translation.
 *
 * Concurrent runs sharing one store are unsupported: the full rewrite means
 * last writer wins.
 */

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use sha2::{Digest, Sha256};

use crate::errors::CacheError;
use crate::file_utils::FileManager;

/// Compute the stable cache key for one protected, normalized segment.
///
/// SHA-256 over the `|`-joined provider id, source language, target
/// language, and text. Identical inputs always produce the identical key;
/// distinct inputs essentially never collide.
pub fn cache_key(provider: &str, source_lang: &str, target_lang: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{provider}|{source_lang}|{target_lang}|{text}").as_bytes());
    let digest = hasher.finalize();

    let mut key = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(key, "{byte:02x}");
    }
    key
}

/// Durable translation cache, keyed by [`cache_key`] digests.
///
/// Stored values are the translated and still-protected strings; token
/// restoration happens on every exit path, never before storage.
pub struct TranslationCache {
    /// Store file location
    path: PathBuf,

    /// In-memory entries, loaded wholesale at startup
    entries: HashMap<String, String>,

    /// Cache hit counter
    hits: usize,

    /// Cache miss counter
    misses: usize,
}

impl TranslationCache {
    /// Load the store from disk.
    ///
    /// A missing store is simply an empty cache. A malformed store is
    /// logged and treated as empty rather than failing the run.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let entries = if FileManager::file_exists(&path) {
            match FileManager::read_to_string(&path) {
                Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                    Ok(entries) => {
                        debug!("Loaded {} cache entries from {:?}", entries.len(), path);
                        entries
                    }
                    Err(e) => {
                        warn!("Cache store at {:?} is malformed ({}), starting empty", path, e);
                        HashMap::new()
                    }
                },
                Err(e) => {
                    warn!("Cache store at {:?} is unreadable ({}), starting empty", path, e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Self {
            path,
            entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Get a translation from the cache
    pub fn get(&mut self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(translation) => {
                self.hits += 1;
                debug!("Cache hit for {}", &key[..12.min(key.len())]);
                Some(translation.as_str())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a translation in the cache (in memory only; see [`Self::persist`])
    pub fn insert(&mut self, key: String, translation: String) {
        self.entries.insert(key, translation);
    }

    /// Rewrite the whole store on disk.
    ///
    /// Writes through a sibling temp file and renames it into place, so a
    /// failed save leaves the previously saved entries intact.
    pub fn persist(&self) -> Result<(), CacheError> {
        let serialized = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| CacheError::Serialize(e.to_string()))?;

        FileManager::write_atomic(&self.path, &serialized).map_err(|e| CacheError::Persist {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let total = self.hits + self.misses;
        let hit_rate = if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        };
        (self.hits, self.misses, hit_rate)
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The store file location
    pub fn path(&self) -> &Path {
        &self.path
    }
}
