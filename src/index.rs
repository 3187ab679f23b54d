//! In-memory n-gram index over a phrase dictionary.
//!
//! The index maps each phrase (by its exact original text) to that
//! phrase's gram histogram, and separately records insertion order so
//! that search can break score ties deterministically — a hash map alone
//! guarantees no iteration order.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::gram::{gram_histogram, GramHistogram};

/// Build-once, query-many index of phrase gram histograms.
///
/// Owned exclusively by one matcher instance. Building is additive:
/// repeated [`extend`](GramIndex::extend) calls accumulate phrases, and an
/// explicit [`reset`](GramIndex::reset) clears everything. Inserting a
/// phrase that is already indexed is a no-op, so a phrase's stored
/// histogram never changes between resets.
#[derive(Debug, Clone)]
pub struct GramIndex {
    histograms: FxHashMap<String, GramHistogram>,
    /// Phrases in first-insertion order; keys of `histograms`, exactly.
    order: Vec<String>,
    gram_size: usize,
}

impl GramIndex {
    /// Create an empty index producing grams of length `gram_size`.
    pub fn new(gram_size: usize) -> Self {
        debug_assert!(gram_size >= 1, "gram length must be at least 1");
        Self {
            histograms: FxHashMap::default(),
            order: Vec::new(),
            gram_size,
        }
    }

    /// The gram length this index was built with.
    pub fn gram_size(&self) -> usize {
        self.gram_size
    }

    /// Index a single phrase.
    ///
    /// Returns `true` if the phrase was added, `false` if it was already
    /// indexed (in which case nothing is recomputed or double-counted).
    /// A phrase shorter than the gram length is stored with an empty
    /// histogram.
    pub fn insert_phrase(&mut self, phrase: &str) -> bool {
        if self.histograms.contains_key(phrase) {
            return false;
        }

        let histogram = gram_histogram(phrase, self.gram_size);
        self.histograms.insert(phrase.to_owned(), histogram);
        self.order.push(phrase.to_owned());
        true
    }

    /// Index every phrase in `dictionary`, skipping phrases already present.
    pub fn extend<I, S>(&mut self, dictionary: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0usize;
        for phrase in dictionary {
            if self.insert_phrase(phrase.as_ref()) {
                added += 1;
            }
        }
        debug!(added, total = self.len(), "indexed dictionary phrases");
    }

    /// Clear the index entirely. Always succeeds.
    pub fn reset(&mut self) {
        self.histograms.clear();
        self.order.clear();
        debug!("index reset");
    }

    /// Number of indexed phrases.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the index holds no phrases.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `phrase` (exact original text) is indexed.
    pub fn contains(&self, phrase: &str) -> bool {
        self.histograms.contains_key(phrase)
    }

    /// The stored histogram for `phrase`, if indexed.
    pub fn histogram(&self, phrase: &str) -> Option<&GramHistogram> {
        self.histograms.get(phrase)
    }

    /// Iterate phrases with their histograms, in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GramHistogram)> {
        self.order.iter().map(move |phrase| {
            let histogram = &self.histograms[phrase];
            (phrase.as_str(), histogram)
        })
    }

    /// Iterate indexed phrases in first-insertion order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
