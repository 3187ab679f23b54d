//! Token sets and fuzzy overlap scoring.
//!
//! Phrases are split into unique lowercase tokens on whitespace; two
//! phrases are compared by how many tokens of the smaller set have a
//! near-match (by normalized edit distance) in the other set. This is the
//! Szymkiewicz-Simpson overlap coefficient with a fuzzy membership test,
//! so "color" still counts as present in a phrase containing "colour".
//!
//! Tokenization always splits the original text on whitespace; it does not
//! consume the gram-side normalization, which removes those boundaries.

use rustc_hash::FxHashSet;

use crate::distance::{damerau_levenshtein_memo, MemoCache};

/// Split `text` on whitespace into a set of unique lowercase tokens.
///
/// # Example
///
/// ```rust
/// use fuzzygram::tokens::token_set;
///
/// let set = token_set("New York  new");
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("new"));
/// assert!(set.contains("york"));
/// ```
pub fn token_set(text: &str) -> FxHashSet<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Whether two tokens are a near-match under `edit_threshold`.
///
/// The edit-similarity of a pair is `1 − distance / max(len)`; the pair
/// matches when that similarity meets or exceeds the threshold. With a
/// threshold of 1.0 only exact (case-insensitive) matches qualify.
/// Lengths are measured on the lowercased tokens, matching the strings
/// the distance is computed over (lowercasing can expand a character, and
/// the shorter pre-lowercase count would push the similarity below its
/// true value, or below zero).
fn tokens_match(a: &str, b: &str, edit_threshold: f64, cache: &MemoCache) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let normalizer = a.chars().count().max(b.chars().count());
    if normalizer == 0 {
        // Two empty tokens are trivially identical
        return true;
    }

    let distance = damerau_levenshtein_memo(&a, &b, cache) as f64;
    1.0 - distance / normalizer as f64 >= edit_threshold
}

/// Fuzzy Szymkiewicz-Simpson overlap coefficient between two token sets.
///
/// Counts tokens of the smaller set that have at least one near-match in
/// the larger set, divided by the smaller set's size. Counting each token
/// at most once keeps the result in `[0, 1]` even when one token
/// near-matches several counterparts. When the sets are the same size
/// either one is "the smaller", and the fuzzy match test makes the two
/// directions disagree in general, so the larger of the two directional
/// counts is taken — the coefficient is symmetric in its arguments.
///
/// Degenerate inputs take defined values rather than faulting: both sets
/// empty → `1.0` (two empty phrases are identical), exactly one empty →
/// `0.0`.
pub fn overlap_coefficient(
    a: &FxHashSet<String>,
    b: &FxHashSet<String>,
    edit_threshold: f64,
    cache: &MemoCache,
) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (smaller, larger) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let forward = matched_fraction(smaller, larger, edit_threshold, cache);
    if smaller.len() == larger.len() {
        // The distance cache makes the reverse pass cheap
        forward.max(matched_fraction(larger, smaller, edit_threshold, cache))
    } else {
        forward
    }
}

/// Fraction of tokens in `from` with at least one near-match in `into`.
fn matched_fraction(
    from: &FxHashSet<String>,
    into: &FxHashSet<String>,
    edit_threshold: f64,
    cache: &MemoCache,
) -> f64 {
    let matched = from
        .iter()
        .filter(|token| {
            into.iter()
                .any(|other| tokens_match(token, other, edit_threshold, cache))
        })
        .count();

    matched as f64 / from.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(text: &str) -> FxHashSet<String> {
        token_set(text)
    }

    #[test]
    fn test_token_set_dedupes_and_lowercases() {
        let tokens = set("New york NEW York");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("new"));
        assert!(tokens.contains("york"));
    }

    #[test]
    fn test_token_set_empty_text() {
        assert!(set("").is_empty());
        assert!(set("   \t ").is_empty());
    }

    #[test]
    fn test_overlap_subset_is_full() {
        let cache = MemoCache::new();
        let a = set("new york city");
        let b = set("new york");
        // Every token of the smaller set matches exactly
        assert_eq!(overlap_coefficient(&a, &b, 1.0, &cache), 1.0);
    }

    #[test]
    fn test_overlap_fuzzy_token_match() {
        let cache = MemoCache::new();
        let a = set("red color");
        let b = set("red colour");
        // "color" vs "colour": similarity 5/6 ≈ 0.83 passes at 0.7
        assert_eq!(overlap_coefficient(&a, &b, 0.7, &cache), 1.0);
        // ...but not at 0.9
        assert_eq!(overlap_coefficient(&a, &b, 0.9, &cache), 0.5);
    }

    #[test]
    fn test_overlap_disjoint_sets() {
        let cache = MemoCache::new();
        let a = set("alpha beta");
        let b = set("gamma delta");
        assert_eq!(overlap_coefficient(&a, &b, 0.7, &cache), 0.0);
    }

    #[test]
    fn test_overlap_bounded_by_one() {
        let cache = MemoCache::new();
        // "ab" near-matches both "ab" and "abc"; it must still count once
        let a = set("ab");
        let b = set("ab abc");
        let score = overlap_coefficient(&a, &b, 0.6, &cache);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_overlap_empty_sets() {
        let cache = MemoCache::new();
        let empty = FxHashSet::default();
        let full = set("new york");
        assert_eq!(overlap_coefficient(&empty, &empty, 0.7, &cache), 1.0);
        assert_eq!(overlap_coefficient(&empty, &full, 0.7, &cache), 0.0);
        assert_eq!(overlap_coefficient(&full, &empty, 0.7, &cache), 0.0);
    }

    #[test]
    fn test_overlap_symmetric() {
        let cache = MemoCache::new();
        let a = set("new york city");
        let b = set("york new");
        assert_eq!(
            overlap_coefficient(&a, &b, 0.7, &cache),
            overlap_coefficient(&b, &a, 0.7, &cache)
        );
    }

    #[test]
    fn test_overlap_symmetric_for_equal_size_sets() {
        let cache = MemoCache::new();
        // Equal-size sets where the directional counts disagree: every
        // token of {aa, ab} near-matches into {ab, zz} at 0.5, but "zz"
        // matches nothing in the other direction
        let a = set("aa ab");
        let b = set("ab zz");

        let forward = overlap_coefficient(&a, &b, 0.5, &cache);
        let backward = overlap_coefficient(&b, &a, 0.5, &cache);
        assert_eq!(forward, backward);
        assert_eq!(forward, 1.0);
    }

    #[test]
    fn test_overlap_expanding_lowercase_token() {
        let cache = MemoCache::new();
        // Caller-built sets need not be lowercased. 'İ' lowercases to
        // two chars, so the pair similarity must be measured on the
        // lowercased tokens: "İ" vs "İx" is distance 1 over length 3,
        // not distance 1 over the pre-lowercase length 2
        let a: FxHashSet<String> = ["\u{130}".to_owned()].into_iter().collect();
        let b: FxHashSet<String> = ["\u{130}x".to_owned()].into_iter().collect();
        assert_eq!(overlap_coefficient(&a, &b, 0.6, &cache), 1.0);
    }
}
