//! # fuzzygram
//!
//! Fuzzy string matching over phrase dictionaries.
//!
//! Given a dictionary of candidate phrases and a query string, `fuzzygram`
//! ranks or filters dictionary entries by similarity to the query,
//! tolerating typos, word reordering, and partial token overlap. It is an
//! embeddable component for autocomplete, search-as-you-type, and
//! approximate lookup — not a full-text search engine.
//!
//! Two signals are computed per candidate and combined into one score:
//!
//! - **n-gram cosine similarity** — phrases are vectorized as histograms
//!   of character trigrams (configurable length) over lowercased,
//!   whitespace-stripped text; candidates are compared to the query by
//!   cosine similarity, which captures structure independent of word order.
//! - **fuzzy token overlap** — phrases are split into unique lowercase
//!   tokens; the overlap coefficient counts tokens of the smaller set with
//!   a near-match (by Damerau-Levenshtein distance) in the other set, so
//!   "color" still matches a phrase containing "colour".
//!
//! All scores live on the similarity scale: `[0, 1]`, higher is better.
//!
//! ## Example
//!
//! ```rust
//! use fuzzygram::prelude::*;
//!
//! let config = Config::builder().score_threshold(0.4).build().unwrap();
//! let mut matcher = FuzzyMatcher::new(config);
//! matcher.index_phrases(["apple pie", "banana split", "grape juice"]);
//!
//! let matches = matcher.search("aple pie");
//! assert_eq!(matches[0].term, "apple pie");
//!
//! assert!(matcher.search("zzz").is_empty());
//! ```
//!
//! The index is in-memory only and rebuilt from the caller-supplied
//! dictionary; there is no persistence and no I/O. Indexing takes
//! `&mut self` while search takes `&self`, so exclusive mutation and
//! concurrent reads are enforced by the borrow checker.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod distance;
pub mod gram;
pub mod index;
pub mod search;
pub mod tokens;

pub use config::{Config, ConfigBuilder, ConfigError};
pub use search::{FuzzyMatcher, ScoredMatch};

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder, ConfigError};
    pub use crate::distance::{damerau_levenshtein, normalized_distance};
    pub use crate::gram::{cosine_similarity, gram_histogram, GramHistogram};
    pub use crate::index::GramIndex;
    pub use crate::search::{FuzzyMatcher, ScoredMatch};
    pub use crate::tokens::{overlap_coefficient, token_set};
}
