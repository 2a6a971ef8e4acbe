//! Extraction configuration.

use crate::vocabulary::Vocabulary;

/// Percentages at or above this value are treated as outliers and dropped.
pub const PERCENTAGE_OUTLIER_THRESHOLD: f64 = 1000.0;

/// Number of year entries kept after ranking.
pub const MAX_YEAR_MENTIONS: usize = 10;

/// Number of currency amounts kept, in document order.
pub const MAX_CURRENCY_MENTIONS: usize = 10;

/// Configuration for an [`InsightExtractor`](crate::InsightExtractor).
///
/// Fixed at call time; nothing is read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Upper bound (exclusive) for plausible percentage values.
    pub percentage_outlier_threshold: f64,

    /// Number of year mentions kept (top-N by count).
    pub max_year_mentions: usize,

    /// Number of currency mentions kept (first-N in document order).
    pub max_currency_mentions: usize,

    /// Category vocabulary for the keyword-count passes.
    pub vocabulary: Vocabulary,
}

impl ExtractorConfig {
    /// Create a configuration with the default constants and the given vocabulary.
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            ..Self::default()
        }
    }

    /// Set the percentage outlier threshold.
    pub const fn percentage_outlier_threshold(mut self, threshold: f64) -> Self {
        self.percentage_outlier_threshold = threshold;
        self
    }

    /// Set the number of year mentions kept.
    pub const fn max_year_mentions(mut self, n: usize) -> Self {
        self.max_year_mentions = n;
        self
    }

    /// Set the number of currency mentions kept.
    pub const fn max_currency_mentions(mut self, n: usize) -> Self {
        self.max_currency_mentions = n;
        self
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            percentage_outlier_threshold: PERCENTAGE_OUTLIER_THRESHOLD,
            max_year_mentions: MAX_YEAR_MENTIONS,
            max_currency_mentions: MAX_CURRENCY_MENTIONS,
            vocabulary: Vocabulary::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.percentage_outlier_threshold, 1000.0);
        assert_eq!(config.max_year_mentions, 10);
        assert_eq!(config.max_currency_mentions, 10);
        assert!(!config.vocabulary.is_empty());
    }

    #[test]
    fn test_builder_setters() {
        let config = ExtractorConfig::default()
            .percentage_outlier_threshold(200.0)
            .max_year_mentions(3)
            .max_currency_mentions(5);

        assert_eq!(config.percentage_outlier_threshold, 200.0);
        assert_eq!(config.max_year_mentions, 3);
        assert_eq!(config.max_currency_mentions, 5);
    }
}
