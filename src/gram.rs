//! Character n-gram extraction and cosine similarity.
//!
//! A phrase is vectorized as a histogram of its fixed-length character
//! n-grams; two phrases are compared by the cosine of the angle between
//! their histogram vectors. Structural similarity measured this way is
//! insensitive to word order and tolerant of small local edits.

use rustc_hash::FxHashMap;

/// Occurrence counts of each n-gram within one normalized phrase.
///
/// Every recorded count is at least 1; grams that do not occur are simply
/// absent from the map.
pub type GramHistogram = FxHashMap<String, u32>;

/// Normalize text for n-gram extraction: lowercase and strip all whitespace.
///
/// Whitespace removal lets grams span word boundaries, so reordered words
/// still share most of their grams. Punctuation is kept; stripping it here
/// would silently merge characters that were never adjacent. Tokenization
/// for overlap scoring is derived independently of this function (see
/// [`crate::tokens::token_set`]).
///
/// # Example
///
/// ```rust
/// use fuzzygram::gram::normalize;
///
/// assert_eq!(normalize("New York City"), "newyorkcity");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Build the n-gram histogram of `text` with gram length `n`.
///
/// Pure function: normalizes the text and slides an `n`-character window
/// across it, counting each gram. Text shorter than `n` after
/// normalization yields an empty histogram, never an error.
///
/// # Example
///
/// ```rust
/// use fuzzygram::gram::gram_histogram;
///
/// let hist = gram_histogram("banana", 3);
/// assert_eq!(hist.get("ana"), Some(&2));
/// assert_eq!(hist.get("ban"), Some(&1));
/// assert!(gram_histogram("ab", 3).is_empty());
/// ```
pub fn gram_histogram(text: &str, n: usize) -> GramHistogram {
    debug_assert!(n >= 1, "gram length must be at least 1");

    let normalized: Vec<char> = normalize(text).chars().collect();
    let mut histogram = GramHistogram::default();

    if n == 0 || normalized.len() < n {
        return histogram;
    }

    for window in normalized.windows(n) {
        let gram: String = window.iter().collect();
        *histogram.entry(gram).or_insert(0) += 1;
    }

    histogram
}

/// Cosine similarity between two gram histograms, in `[0, 1]`.
///
/// The dot product runs over grams present in the query histogram that the
/// phrase histogram also contains. Each magnitude sums over ALL grams of
/// its own histogram, so the denominator is a true vector magnitude and
/// extra non-shared grams on either side pull the similarity down.
///
/// If either histogram is empty (text shorter than the gram length), the
/// similarity is defined as `0.0` — completely different, not an error.
pub fn cosine_similarity(phrase: &GramHistogram, query: &GramHistogram) -> f64 {
    let mut dot: u64 = 0;
    let mut query_mag_sq: u64 = 0;

    for (gram, &q_count) in query {
        query_mag_sq += u64::from(q_count) * u64::from(q_count);

        if let Some(&p_count) = phrase.get(gram) {
            dot += u64::from(q_count) * u64::from(p_count);
        }
    }

    let phrase_mag_sq: u64 = phrase
        .values()
        .map(|&c| u64::from(c) * u64::from(c))
        .sum();

    let mag_product = (query_mag_sq as f64) * (phrase_mag_sq as f64);
    if mag_product == 0.0 {
        return 0.0;
    }

    dot as f64 / mag_product.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_whitespace() {
        assert_eq!(normalize("Apple Pie"), "applepie");
        assert_eq!(normalize("  a\tb\nc  "), "abc");
        assert_eq!(normalize("Grape-Juice"), "grape-juice");
    }

    #[test]
    fn test_histogram_counts() {
        let hist = gram_histogram("banana", 3);
        assert_eq!(hist.get("ban"), Some(&1));
        assert_eq!(hist.get("ana"), Some(&2));
        assert_eq!(hist.get("nan"), Some(&1));
        assert_eq!(hist.len(), 3);
    }

    #[test]
    fn test_histogram_spans_word_boundaries() {
        // "apple pie" normalizes to "applepie", so "epi" exists
        let hist = gram_histogram("apple pie", 3);
        assert_eq!(hist.get("epi"), Some(&1));
    }

    #[test]
    fn test_histogram_short_text_is_empty() {
        assert!(gram_histogram("ab", 3).is_empty());
        assert!(gram_histogram("", 3).is_empty());
        // Whitespace does not count toward the window
        assert!(gram_histogram("a b", 3).is_empty());
    }

    #[test]
    fn test_histogram_gram_length_one() {
        let hist = gram_histogram("aab", 1);
        assert_eq!(hist.get("a"), Some(&2));
        assert_eq!(hist.get("b"), Some(&1));
    }

    #[test]
    fn test_cosine_identical_histograms() {
        let a = gram_histogram("apple pie", 3);
        let b = gram_histogram("applepie", 3);
        let sim = cosine_similarity(&a, &b);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_disjoint_histograms() {
        let a = gram_histogram("apple", 3);
        let b = gram_histogram("zzzzz", 3);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_empty_histogram_is_zero() {
        let empty = GramHistogram::default();
        let full = gram_histogram("apple", 3);
        assert_eq!(cosine_similarity(&empty, &full), 0.0);
        assert_eq!(cosine_similarity(&full, &empty), 0.0);
        assert_eq!(cosine_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn test_cosine_within_bounds() {
        let a = gram_histogram("apple pie", 3);
        let b = gram_histogram("aple pie", 3);
        let sim = cosine_similarity(&a, &b);
        assert!(sim > 0.0 && sim <= 1.0, "similarity {} out of bounds", sim);
    }

    #[test]
    fn test_cosine_full_phrase_magnitude() {
        // The phrase has grams the query lacks; its full magnitude must
        // appear in the denominator, keeping the similarity below 1.
        let phrase = gram_histogram("apple pie with cream", 3);
        let query = gram_histogram("apple pie", 3);
        let sim = cosine_similarity(&phrase, &query);
        assert!(sim < 1.0);
        assert!(sim > 0.0);
    }
}
