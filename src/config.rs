//! Matcher configuration.
//!
//! A [`Config`] is immutable once a matcher is built around it. Construct
//! one with [`ConfigBuilder`], which validates ranges, or start from
//! [`Config::default`].

/// Error type for configuration validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Gram length must be at least 1.
    #[error("n-gram size must be at least 1")]
    ZeroGramSize,
    /// A similarity threshold fell outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    ThresholdOutOfRange {
        /// Which threshold was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The gram/overlap weighting fell outside `[0, 1]`.
    #[error("gram weight must lie in [0, 1], got {0}")]
    WeightOutOfRange(f64),
}

/// Tunable parameters of a [`FuzzyMatcher`](crate::FuzzyMatcher).
///
/// All scores are on the similarity scale: `[0, 1]`, higher is better.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Sort results by descending score. Default `true`.
    pub sort: bool,
    /// Gram window length for indexing and query histograms. Default `3`.
    pub n_gram_size: usize,
    /// Queries shorter than this (in characters) return no matches.
    /// Default `2`.
    pub min_query_length: usize,
    /// Inclusive similarity floor for a phrase to qualify. Default `0.4`.
    pub score_threshold: f64,
    /// Per-token-pair edit-similarity cutoff for overlap scoring.
    /// Default `0.7`.
    pub edit_similarity_threshold: f64,
    /// Return every qualifying phrase (`true`, the default) or only the
    /// single best match (`false`).
    pub all_matches: bool,
    /// Weight of the n-gram cosine component in the composite score; the
    /// token-overlap component receives `1 − gram_weight`. Default `0.6`,
    /// prioritizing structural similarity since edits capture only
    /// misspellings.
    pub gram_weight: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sort: true,
            n_gram_size: 3,
            min_query_length: 2,
            score_threshold: 0.4,
            edit_similarity_threshold: 0.7,
            all_matches: true,
            gram_weight: 0.6,
        }
    }
}

impl Config {
    /// Start building a configuration from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for [`Config`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use fuzzygram::config::Config;
///
/// let config = Config::builder()
///     .n_gram_size(2)
///     .score_threshold(0.5)
///     .all_matches(false)
///     .build()
///     .unwrap();
/// assert_eq!(config.n_gram_size, 2);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder seeded with the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set whether results are sorted by descending score.
    pub fn sort(mut self, sort: bool) -> Self {
        self.config.sort = sort;
        self
    }

    /// Set the gram window length.
    pub fn n_gram_size(mut self, n: usize) -> Self {
        self.config.n_gram_size = n;
        self
    }

    /// Set the minimum query length (in characters).
    pub fn min_query_length(mut self, len: usize) -> Self {
        self.config.min_query_length = len;
        self
    }

    /// Set the inclusive similarity floor for qualifying phrases.
    pub fn score_threshold(mut self, threshold: f64) -> Self {
        self.config.score_threshold = threshold;
        self
    }

    /// Set the per-token-pair edit-similarity cutoff.
    pub fn edit_similarity_threshold(mut self, threshold: f64) -> Self {
        self.config.edit_similarity_threshold = threshold;
        self
    }

    /// Set whether every qualifying phrase is returned or only the best.
    pub fn all_matches(mut self, all: bool) -> Self {
        self.config.all_matches = all;
        self
    }

    /// Set the weight of the n-gram component in the composite score.
    pub fn gram_weight(mut self, weight: f64) -> Self {
        self.config.gram_weight = weight;
        self
    }

    /// Validate and produce the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the gram size is zero, either
    /// threshold lies outside `[0, 1]`, or the gram weight lies outside
    /// `[0, 1]`.
    pub fn build(self) -> Result<Config, ConfigError> {
        let config = self.config;

        if config.n_gram_size == 0 {
            return Err(ConfigError::ZeroGramSize);
        }
        if !(0.0..=1.0).contains(&config.score_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "score threshold",
                value: config.score_threshold,
            });
        }
        if !(0.0..=1.0).contains(&config.edit_similarity_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "edit similarity threshold",
                value: config.edit_similarity_threshold,
            });
        }
        if !(0.0..=1.0).contains(&config.gram_weight) {
            return Err(ConfigError::WeightOutOfRange(config.gram_weight));
        }

        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::builder().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = Config::builder()
            .sort(false)
            .n_gram_size(4)
            .min_query_length(1)
            .score_threshold(0.25)
            .edit_similarity_threshold(0.9)
            .all_matches(false)
            .gram_weight(0.5)
            .build()
            .unwrap();

        assert!(!config.sort);
        assert_eq!(config.n_gram_size, 4);
        assert_eq!(config.min_query_length, 1);
        assert_eq!(config.score_threshold, 0.25);
        assert_eq!(config.edit_similarity_threshold, 0.9);
        assert!(!config.all_matches);
        assert_eq!(config.gram_weight, 0.5);
    }

    #[test]
    fn test_zero_gram_size_rejected() {
        let err = Config::builder().n_gram_size(0).build().unwrap_err();
        assert_eq!(err, ConfigError::ZeroGramSize);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let err = Config::builder().score_threshold(1.5).build().unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOutOfRange { .. }));

        let err = Config::builder()
            .edit_similarity_threshold(-0.1)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOutOfRange { .. }));
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let err = Config::builder().gram_weight(2.0).build().unwrap_err();
        assert_eq!(err, ConfigError::WeightOutOfRange(2.0));
    }
}
