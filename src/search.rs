//! Composite scoring and search over the indexed dictionary.
//!
//! [`FuzzyMatcher`] owns the configuration and the gram index and exposes
//! the query surface: composite per-phrase scoring, threshold-filtered
//! search, and single-best lookup.

use tracing::{debug, trace};

use crate::config::Config;
use crate::distance::MemoCache;
use crate::gram::{cosine_similarity, gram_histogram, GramHistogram};
use crate::index::GramIndex;
use crate::tokens::{overlap_coefficient, token_set};

/// A phrase that qualified for a query, with its composite score.
///
/// Scores are on the similarity scale: `[0, 1]`, higher is better.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredMatch {
    /// The matched phrase, in its exact original dictionary text.
    pub term: String,
    /// Composite similarity of the phrase to the query.
    pub score: f64,
}

/// Fuzzy string matcher over a caller-supplied phrase dictionary.
///
/// Index once, query many times. Indexing ([`index_phrases`]) and
/// [`reset`] take `&mut self`; scoring and search take `&self`, so the
/// borrow checker enforces the single-writer discipline, and a
/// non-mutating matcher can serve concurrent searches.
///
/// [`index_phrases`]: FuzzyMatcher::index_phrases
/// [`reset`]: FuzzyMatcher::reset
///
/// # Example
///
/// ```rust
/// use fuzzygram::FuzzyMatcher;
///
/// let mut matcher = FuzzyMatcher::with_defaults();
/// matcher.index_phrases(["apple pie", "banana split", "grape juice"]);
///
/// let matches = matcher.search("aple pie");
/// assert_eq!(matches[0].term, "apple pie");
/// ```
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    config: Config,
    index: GramIndex,
}

impl FuzzyMatcher {
    /// Create a matcher with an empty index and the given configuration.
    pub fn new(config: Config) -> Self {
        let index = GramIndex::new(config.n_gram_size);
        Self { config, index }
    }

    /// Create a matcher with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    /// The matcher's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read access to the underlying gram index.
    pub fn index(&self) -> &GramIndex {
        &self.index
    }

    /// Index the phrases of `dictionary`, skipping any already indexed.
    ///
    /// Additive: call repeatedly to grow the dictionary. Use
    /// [`reset`](FuzzyMatcher::reset) first to rebuild from scratch.
    pub fn index_phrases<I, S>(&mut self, dictionary: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.index.extend(dictionary);
    }

    /// Clear the index. The configuration is untouched.
    pub fn reset(&mut self) {
        self.index.reset();
    }

    /// Composite similarity of `phrase` to `query`, in `[0, 1]`.
    ///
    /// Weighted linear combination of the n-gram cosine similarity and the
    /// fuzzy token-overlap coefficient, weighted by
    /// [`gram_weight`](Config::gram_weight). Monotonic in both components.
    /// Uses the stored histogram when `phrase` is indexed and computes one
    /// on the fly otherwise, so the function is usable stand-alone.
    pub fn score(&self, phrase: &str, query: &str) -> f64 {
        let query_histogram = gram_histogram(query, self.config.n_gram_size);
        let query_tokens = token_set(query);
        let cache = MemoCache::new();
        self.score_with(phrase, &query_histogram, &query_tokens, &cache)
    }

    fn score_with(
        &self,
        phrase: &str,
        query_histogram: &GramHistogram,
        query_tokens: &rustc_hash::FxHashSet<String>,
        cache: &MemoCache,
    ) -> f64 {
        let computed;
        let phrase_histogram = match self.index.histogram(phrase) {
            Some(stored) => stored,
            None => {
                computed = gram_histogram(phrase, self.config.n_gram_size);
                &computed
            }
        };

        let gram = cosine_similarity(phrase_histogram, query_histogram);
        let overlap = overlap_coefficient(
            &token_set(phrase),
            query_tokens,
            self.config.edit_similarity_threshold,
            cache,
        );

        let weight = self.config.gram_weight;
        let score = weight * gram + (1.0 - weight) * overlap;
        trace!(phrase, gram, overlap, score, "scored candidate");
        score
    }

    /// Search the indexed dictionary for phrases similar to `query`.
    ///
    /// Contract:
    /// - a query shorter than [`min_query_length`](Config::min_query_length)
    ///   characters returns no matches (no full-dictionary fallback);
    /// - an empty index returns no matches;
    /// - every indexed phrase is scored; phrases with
    ///   `score ≥ score_threshold` qualify;
    /// - with [`sort`](Config::sort) set, results are ordered by descending
    ///   score, ties broken by dictionary insertion order (stable sort);
    /// - with [`all_matches`](Config::all_matches) unset, at most the
    ///   single top-scoring match is returned.
    ///
    /// Never mutates the index or the configuration.
    pub fn search(&self, query: &str) -> Vec<ScoredMatch> {
        if query.chars().count() < self.config.min_query_length {
            debug!(query, "query below minimum length");
            return Vec::new();
        }
        if self.index.is_empty() {
            return Vec::new();
        }

        let mut matches = self.qualifying_matches(query);

        if self.config.sort {
            // Stable: equal scores keep dictionary insertion order
            matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        }

        if !self.config.all_matches {
            matches = self.top_match(matches).into_iter().collect();
        }

        debug!(query, matches = matches.len(), "search complete");
        matches
    }

    /// The single best match for `query`, regardless of
    /// [`all_matches`](Config::all_matches).
    ///
    /// Returns `None` when no phrase qualifies (or the query is too
    /// short). On score ties the earliest-indexed phrase wins.
    pub fn best_match(&self, query: &str) -> Option<ScoredMatch> {
        if query.chars().count() < self.config.min_query_length || self.index.is_empty() {
            return None;
        }
        self.top_match(self.qualifying_matches(query))
    }

    /// Score all indexed phrases against `query`, in insertion order,
    /// keeping those at or above the score threshold.
    fn qualifying_matches(&self, query: &str) -> Vec<ScoredMatch> {
        let query_histogram = gram_histogram(query, self.config.n_gram_size);
        let query_tokens = token_set(query);
        let cache = MemoCache::new();

        self.index
            .phrases()
            .filter_map(|phrase| {
                let score = self.score_with(phrase, &query_histogram, &query_tokens, &cache);
                (score >= self.config.score_threshold).then(|| ScoredMatch {
                    term: phrase.to_owned(),
                    score,
                })
            })
            .collect()
    }

    /// Reduce `matches` to the first-encountered maximum, if any.
    fn top_match(&self, matches: Vec<ScoredMatch>) -> Option<ScoredMatch> {
        matches.into_iter().reduce(|best, candidate| {
            if candidate.score > best.score {
                candidate
            } else {
                best
            }
        })
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
