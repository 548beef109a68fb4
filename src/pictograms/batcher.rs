//! Bounded-concurrency word lookup.
//!
//! Words are lower-cased and deduplicated preserving first-seen order, then
//! processed in consecutive chunks of at most the configured width. One
//! chunk's lookups run concurrently on a thread pool and the whole chunk is
//! collected before the next one starts. A single word's failure never
//! aborts the batch.

use super::{LookupResult, LookupService, PictogramMatch};
use crate::cancellation::CancellationToken;
use std::collections::HashSet;
use std::sync::{Arc, mpsc};
use threadpool::ThreadPool;
use tracing::{debug, info, warn};

pub struct LookupBatcher<S: LookupService + 'static> {
    service: Arc<S>,
    concurrency: usize,
    word_cap: Option<usize>,
}

impl<S: LookupService + 'static> LookupBatcher<S> {
    pub fn new(service: S, concurrency: usize) -> Self {
        Self {
            service: Arc::new(service),
            concurrency: concurrency.max(1),
            word_cap: None,
        }
    }

    /// Cap the number of unique words attempted per fetch, in first-seen
    /// order. Words beyond the cap are never attempted and get no entry in
    /// the result map.
    pub fn with_word_cap(mut self, cap: Option<usize>) -> Self {
        self.word_cap = cap;
        self
    }

    /// Resolve every word to its first match, or `None` on miss/failure.
    /// Blocks until all chunks complete; never fails as a whole.
    pub fn fetch(&self, words: &[String], locale: &str) -> LookupResult {
        self.fetch_with_cancel(words, locale, None)
    }

    /// Like [`fetch`](Self::fetch), but stops issuing further chunks once
    /// `cancel` fires. Words in chunks already collected keep their entries.
    pub fn fetch_with_cancel(
        &self,
        words: &[String],
        locale: &str,
        cancel: Option<&CancellationToken>,
    ) -> LookupResult {
        let mut attempted = dedupe_words(words);
        if let Some(cap) = self.word_cap {
            if attempted.len() > cap {
                debug!(
                    dropped = attempted.len() - cap,
                    cap, "Applying unique-word cap"
                );
                attempted.truncate(cap);
            }
        }

        let mut results = LookupResult::new();
        if attempted.is_empty() {
            return results;
        }
        info!(
            words = attempted.len(),
            locale,
            concurrency = self.concurrency,
            "Fetching pictogram batch"
        );

        if self.concurrency == 1 || attempted.len() == 1 {
            for word in &attempted {
                if is_cancelled(cancel) {
                    warn!(resolved = results.len(), "Lookup batch cancelled");
                    break;
                }
                let outcome = run_lookup(self.service.as_ref(), word, locale);
                results.insert(word.clone(), outcome);
            }
            return results;
        }

        let pool = ThreadPool::new(self.concurrency);
        for chunk in attempted.chunks(self.concurrency) {
            if is_cancelled(cancel) {
                warn!(resolved = results.len(), "Lookup batch cancelled");
                break;
            }

            let (tx, rx) = mpsc::channel::<(String, Option<PictogramMatch>)>();
            for word in chunk {
                let tx = tx.clone();
                let service = Arc::clone(&self.service);
                let word = word.clone();
                let locale = locale.to_string();
                pool.execute(move || {
                    let outcome = run_lookup(service.as_ref(), &word, &locale);
                    let _ = tx.send((word, outcome));
                });
            }
            drop(tx);

            // Await the full chunk before the next one starts.
            for (word, outcome) in rx {
                results.insert(word, outcome);
            }
        }

        debug!(entries = results.len(), "Pictogram batch complete");
        results
    }
}

fn is_cancelled(cancel: Option<&CancellationToken>) -> bool {
    cancel.map(CancellationToken::is_cancelled).unwrap_or(false)
}

fn run_lookup<S: LookupService + ?Sized>(
    service: &S,
    word: &str,
    locale: &str,
) -> Option<PictogramMatch> {
    match service.search(word, locale) {
        Ok(matches) => {
            let first = matches.into_iter().next();
            if first.is_none() {
                debug!(word, "No pictogram match");
            }
            first
        }
        Err(err) => {
            warn!(word, "Pictogram lookup failed: {err}");
            None
        }
    }
}

/// Lower-case and deduplicate, preserving first-seen order; blank entries
/// are skipped.
fn dedupe_words(words: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for word in words {
        let lowered = word.trim().to_lowercase();
        if lowered.is_empty() {
            continue;
        }
        if seen.insert(lowered.clone()) {
            unique.push(lowered);
        }
    }
    unique
}
