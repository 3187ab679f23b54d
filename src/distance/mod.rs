//! Edit-distance engine.
//!
//! Implements the restricted Damerau-Levenshtein distance (adjacent
//! transpositions count as a single edit) used both directly and as the
//! basis for the token-overlap similarity in [`crate::tokens`].
//!
//! Comparison is case-insensitive: both inputs are lowercased before the
//! distance table is built.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// A symmetric pair of strings for use as cache keys.
///
/// Ensures that `(a, b)` and `(b, a)` are treated as identical keys,
/// leveraging the symmetric property of distance functions: `d(a,b) == d(b,a)`.
///
/// Strings are ordered lexicographically and stored as `Arc<str>` for
/// efficient cloning and memory sharing.
#[derive(Clone, Debug)]
struct SymmetricPair {
    first: Arc<str>,
    second: Arc<str>,
}

impl SymmetricPair {
    /// Create a new SymmetricPair, ordering strings lexicographically.
    #[inline(always)]
    fn new(a: &str, b: &str) -> Self {
        match a.cmp(b) {
            Ordering::Less | Ordering::Equal => Self {
                first: Arc::from(a),
                second: Arc::from(b),
            },
            Ordering::Greater => Self {
                first: Arc::from(b),
                second: Arc::from(a),
            },
        }
    }
}

impl PartialEq for SymmetricPair {
    fn eq(&self, other: &Self) -> bool {
        self.first == other.first && self.second == other.second
    }
}

impl Eq for SymmetricPair {}

impl Hash for SymmetricPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.first.hash(state);
        self.second.hash(state);
    }
}

/// Thread-safe memoization cache for distance computations.
///
/// Token-overlap scoring compares every query token against every token of
/// every candidate phrase; tokens repeat heavily across candidates, so the
/// same pair is often requested many times within one search. The cache is
/// keyed symmetrically, so `d(a, b)` and `d(b, a)` share one entry.
pub struct MemoCache {
    cache: RwLock<FxHashMap<SymmetricPair, usize>>,
}

impl MemoCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    fn get(&self, key: &SymmetricPair) -> Option<usize> {
        match self.cache.read() {
            Ok(guard) => guard.get(key).copied(),
            Err(poisoned) => poisoned.into_inner().get(key).copied(),
        }
    }

    fn insert(&self, key: SymmetricPair, value: usize) {
        match self.cache.write() {
            Ok(mut guard) => {
                guard.insert(key, value);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(key, value);
            }
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.cache.read().map(|g| g.len()).unwrap_or(0)
    }
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the restricted Damerau-Levenshtein distance between two strings.
///
/// Counts the minimum number of single-character insertions, deletions,
/// substitutions, and adjacent transpositions required to transform one
/// string into the other. Inputs are compared case-insensitively.
///
/// Uses a rolling three-row dynamic-programming table; either input being
/// empty short-circuits to the other input's character count.
///
/// # Example
///
/// ```rust
/// use fuzzygram::distance::damerau_levenshtein;
///
/// assert_eq!(damerau_levenshtein("kitten", "sitting"), 3);
/// assert_eq!(damerau_levenshtein("ab", "ba"), 1); // One transposition
/// assert_eq!(damerau_levenshtein("Test", "test"), 0);
/// ```
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let a_chars: SmallVec<[char; 32]> = a.chars().collect();
    let b_chars: SmallVec<[char; 32]> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Three rows instead of the full matrix: the transposition term only
    // ever reaches back to row i-2.
    let mut two_ago = vec![0; n + 1];
    let mut prev_row = vec![0; n + 1];
    let mut curr_row = vec![0; n + 1];

    for (j, item) in prev_row.iter_mut().enumerate().take(n + 1) {
        *item = j;
    }

    for i in 1..=m {
        curr_row[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution

            // Adjacent transposition: last two characters are a swapped pair
            if i > 1
                && j > 1
                && a_chars[i - 1] == b_chars[j - 2]
                && a_chars[i - 2] == b_chars[j - 1]
            {
                curr_row[j] = curr_row[j].min(two_ago[j - 2] + cost);
            }
        }

        // Rotate rows
        std::mem::swap(&mut two_ago, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Memoized front-end to [`damerau_levenshtein`].
///
/// Checks `cache` before computing and records the result afterwards.
/// Results are identical to the direct function; this is purely an
/// evaluation shortcut.
pub fn damerau_levenshtein_memo(a: &str, b: &str, cache: &MemoCache) -> usize {
    let key = SymmetricPair::new(a, b);
    if let Some(distance) = cache.get(&key) {
        return distance;
    }

    let distance = damerau_levenshtein(a, b);
    cache.insert(key, distance);
    distance
}

/// Compute a length-normalized Damerau-Levenshtein distance in `[0, 1]`.
///
/// Divides the raw distance by the larger of the two character counts
/// (when lengths are equal, the average of the lengths is that same
/// length, so the maximum covers both cases). Lengths are measured on the
/// lowercased strings — the same strings the distance table is built
/// from, since lowercasing can expand a character (e.g. 'İ' becomes
/// "i\u{307}") and counting the originals would let the ratio exceed 1.
/// Two empty inputs are trivially matching: the result is `0.0`, never a
/// division fault.
///
/// # Example
///
/// ```rust
/// use fuzzygram::distance::normalized_distance;
///
/// assert_eq!(normalized_distance("color", "colour"), 1.0 / 6.0);
/// assert_eq!(normalized_distance("", ""), 0.0);
/// ```
pub fn normalized_distance(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let len_a = a.chars().count();
    let len_b = b.chars().count();

    let normalizer = len_a.max(len_b);
    if normalizer == 0 {
        return 0.0;
    }

    damerau_levenshtein(&a, &b) as f64 / normalizer as f64
}
