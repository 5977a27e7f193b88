/*!
 * Batch translation orchestration.
 *
 * [`BatchTranslator`] ties the pieces together: whitespace normalization,
 * token protection, cache lookup, fixed-size batching of the misses against
 * the provider, token restoration, and cache persistence after every batch.
 *
 * Execution is strictly sequential. The only pacing mechanism is a fixed
 * pause after each provider call to stay under the provider's rate limit;
 * there is no retry or backoff.
 */

use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::errors::TranslationError;
use crate::providers::Provider;

use super::cache::{TranslationCache, cache_key};
use super::normalize::normalize_whitespace;
use super::tokens::{protect, restore};

/// Tunables for one translation run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Source language code as the provider expects it (e.g. "EN")
    pub source_lang: String,

    /// Target language code (e.g. "FR")
    pub target_lang: String,

    /// Upper bound on segments per provider call. A latency/rate-limit
    /// tradeoff, not a correctness constraint.
    pub batch_size: usize,

    /// Fixed pause after every provider call
    pub pause: Duration,
}

/// The per-run translation context: provider, cache, and options, threaded
/// through explicitly instead of living in globals.
pub struct BatchTranslator {
    provider: Box<dyn Provider>,
    cache: TranslationCache,
    options: BatchOptions,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(provider: Box<dyn Provider>, cache: TranslationCache, options: BatchOptions) -> Self {
        Self {
            provider,
            cache,
            options,
        }
    }

    /// Translate a list of segments, preserving input order and length.
    pub fn translate_many(&mut self, segments: &[String]) -> Result<Vec<String>, TranslationError> {
        self.translate_many_with_progress(segments, |_, _| {})
    }

    /// Like [`Self::translate_many`], reporting `(batches_done, batches_total)`
    /// after each provider call.
    pub fn translate_many_with_progress(
        &mut self,
        segments: &[String],
        progress: impl Fn(usize, usize),
    ) -> Result<Vec<String>, TranslationError> {
        // Normalize and shield every segment up front, keeping the token
        // list per segment for restoration.
        let mut prepared = Vec::with_capacity(segments.len());
        let mut token_lists = Vec::with_capacity(segments.len());
        for segment in segments {
            let normalized = normalize_whitespace(segment);
            let (shielded, tokens) = protect(&normalized);
            prepared.push(shielded);
            token_lists.push(tokens);
        }

        // Cache pass. Empty segments short-circuit here: they never reach
        // the provider and never occupy a cache entry.
        let mut results: Vec<Option<String>> = vec![None; segments.len()];
        let mut pending: Vec<usize> = Vec::new();

        for (index, shielded) in prepared.iter().enumerate() {
            if shielded.is_empty() {
                results[index] = Some(String::new());
                continue;
            }

            let key = cache_key(
                self.provider.name(),
                &self.options.source_lang,
                &self.options.target_lang,
                shielded,
            );
            if let Some(hit) = self.cache.get(&key) {
                results[index] = Some(restore(hit, &token_lists[index]));
            } else {
                pending.push(index);
            }
        }

        debug!(
            "{} of {} segments need translation",
            pending.len(),
            segments.len()
        );

        // Submit the misses in input order, in fixed-size batches. The
        // provider is trusted to preserve order but not count: a count
        // mismatch aborts the run instead of misaligning results.
        let batches_total = pending.len().div_ceil(self.options.batch_size.max(1));
        for (batch_index, chunk) in pending.chunks(self.options.batch_size.max(1)).enumerate() {
            let texts: Vec<String> = chunk.iter().map(|&i| prepared[i].clone()).collect();

            let translated = self.provider.translate_batch(
                &texts,
                &self.options.source_lang,
                &self.options.target_lang,
            )?;

            if translated.len() != texts.len() {
                return Err(TranslationError::BatchCountMismatch {
                    batch_index,
                    expected: texts.len(),
                    received: translated.len(),
                });
            }

            for (&segment_index, shielded_translation) in chunk.iter().zip(&translated) {
                let key = cache_key(
                    self.provider.name(),
                    &self.options.source_lang,
                    &self.options.target_lang,
                    &prepared[segment_index],
                );
                // The stored value is still protected; restoration only
                // ever happens on the way out.
                self.cache
                    .insert(key, shielded_translation.clone());
                results[segment_index] =
                    Some(restore(shielded_translation, &token_lists[segment_index]));
            }

            // Persist after every batch so a mid-run failure loses at most
            // one batch of new translations.
            self.cache.persist()?;
            progress(batch_index + 1, batches_total);

            thread::sleep(self.options.pause);
        }

        if batches_total > 0 {
            let (hits, misses, hit_rate) = self.cache.stats();
            info!(
                "Translated {} segments ({} cache hits, {} misses, {:.0}% hit rate)",
                segments.len(),
                hits,
                misses,
                hit_rate * 100.0
            );
        }

        Ok(results
            .into_iter()
            .map(|result| result.unwrap_or_default())
            .collect())
    }

    /// Read access to the underlying cache, mainly for reporting.
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }
}
