//! Pictogram lookup: the per-word search contract, the bounded-concurrency
//! batcher, and the ARASAAC HTTP client.

mod arasaac;
mod batcher;

pub use arasaac::{ArasaacClient, DEFAULT_BASE_URL};
pub use batcher::LookupBatcher;

use anyhow::Result;
use std::collections::BTreeMap;

/// A pictogram image associated with one looked-up word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictogramMatch {
    pub word: String,
    pub external_id: String,
    pub image_url: String,
    pub label: String,
}

/// Best-effort mapping from lower-cased word to its first match. `None`
/// records a word that was attempted but found nothing (or whose lookup
/// failed); words never attempted have no entry at all.
pub type LookupResult = BTreeMap<String, Option<PictogramMatch>>;

/// Per-word search capability, externally owned and rate-limited. Results
/// are ordered by relevance; the first match wins. Failures surface as an
/// error or an empty sequence.
pub trait LookupService: Send + Sync {
    fn search(&self, term: &str, locale: &str) -> Result<Vec<PictogramMatch>>;
}
