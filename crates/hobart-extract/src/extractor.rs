//! Insight extractor
//!
//! Runs every extraction pass over a document and merges the results into an
//! [`InsightSummary`]. The extractor is a pure function of the text and its
//! configuration: identical input yields an identical summary.

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::passes::{self, PercentageStats};
use crate::summary::{InsightSummary, RevenueMentions};
use crate::vocabulary::CategoryGroup;
use indexmap::IndexMap;
use std::thread::{self, ScopedJoinHandle};
use tracing::info;

/// Category counts for the three groups, in summary field order.
type CategoryCounts = (
    IndexMap<String, usize>,
    IndexMap<String, usize>,
    IndexMap<String, usize>,
);

/// Extracts an [`InsightSummary`] from raw document text.
#[derive(Debug, Clone, Default)]
pub struct InsightExtractor {
    config: ExtractorConfig,
}

impl InsightExtractor {
    /// Create an extractor with the given configuration.
    pub const fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// The extractor's configuration.
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Currency amounts in millions, first N in document order.
    ///
    /// # Errors
    ///
    /// See [`passes::extract_currency_mentions`].
    pub fn extract_currency_mentions(&self, text: &str) -> Result<Vec<f64>> {
        passes::extract_currency_mentions(text, self.config.max_currency_mentions)
    }

    /// Top year mentions by count.
    pub fn extract_year_mentions(&self, text: &str) -> IndexMap<String, usize> {
        passes::extract_year_mentions(text, self.config.max_year_mentions)
    }

    /// Category counts for one group of the configured vocabulary.
    pub fn count_category_occurrences(
        &self,
        text: &str,
        group: CategoryGroup,
    ) -> IndexMap<String, usize> {
        passes::count_category_occurrences(text, self.config.vocabulary.categories_in(group))
    }

    /// Percentage statistics under the configured outlier threshold.
    ///
    /// # Errors
    ///
    /// See [`passes::extract_percentage_stats`].
    pub fn extract_percentage_stats(&self, text: &str) -> Result<PercentageStats> {
        passes::extract_percentage_stats(text, self.config.percentage_outlier_threshold)
    }

    /// Run all passes sequentially.
    ///
    /// # Errors
    ///
    /// Only fails if a pass hits a malformed literal; empty matches are not errors.
    pub fn extract(&self, text: &str) -> Result<InsightSummary> {
        let currency = self.extract_currency_mentions(text)?;
        let years = self.extract_year_mentions(text);
        let categories = self.count_all_categories(text);
        let percentages = self.extract_percentage_stats(text)?;

        Ok(self.assemble(text, currency, years, categories, percentages))
    }

    /// Run the passes on scoped worker threads.
    ///
    /// Produces exactly the same summary as [`InsightExtractor::extract`].
    ///
    /// # Errors
    ///
    /// Same as [`InsightExtractor::extract`].
    pub fn extract_concurrent(&self, text: &str) -> Result<InsightSummary> {
        let (currency, years, categories, percentages) = thread::scope(|s| {
            let currency = s.spawn(|| self.extract_currency_mentions(text));
            let years = s.spawn(|| self.extract_year_mentions(text));
            let categories = s.spawn(|| self.count_all_categories(text));
            let percentages = s.spawn(|| self.extract_percentage_stats(text));
            (
                join(currency),
                join(years),
                join(categories),
                join(percentages),
            )
        });

        Ok(self.assemble(text, currency?, years, categories, percentages?))
    }

    fn count_all_categories(&self, text: &str) -> CategoryCounts {
        let lowered = text.to_lowercase();
        let vocab = &self.config.vocabulary;
        (
            passes::categories::count_lowered(
                &lowered,
                vocab.categories_in(CategoryGroup::BusinessSegment),
            ),
            passes::categories::count_lowered(
                &lowered,
                vocab.categories_in(CategoryGroup::Technology),
            ),
            passes::categories::count_lowered(
                &lowered,
                vocab.categories_in(CategoryGroup::MarketTheme),
            ),
        )
    }

    fn assemble(
        &self,
        text: &str,
        currency: Vec<f64>,
        years: IndexMap<String, usize>,
        (business_segments, technology_focus, market_insights): CategoryCounts,
        percentage_stats: PercentageStats,
    ) -> InsightSummary {
        let summary = InsightSummary {
            revenue_mentions: RevenueMentions::from_values(currency),
            year_mentions: years,
            business_segments,
            technology_focus,
            market_insights,
            percentage_stats,
        };

        info!(
            bytes = text.len(),
            currency = summary.revenue_mentions.len(),
            years = summary.year_mentions.len(),
            categories = self.config.vocabulary.len(),
            percentages = summary.percentage_stats.count,
            "extraction complete"
        );
        summary
    }
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{CategoryDefinition, Vocabulary};

    const SAMPLE: &str = "Fiscal 2024 revenue was $60.9 billion, up 126% from fiscal 2023. \
        Data Center revenue was $47.5 billion, driven by AI and the Hopper GPU platform. \
        Gaming revenue was $10,447 million. Gross margin was 72.7% in 2024 and 56.9% in 2023. \
        Export controls on China affect demand for our data center products in 2024.";

    #[test]
    fn test_extract_sample() {
        let summary = InsightExtractor::default().extract(SAMPLE).unwrap();

        assert_eq!(
            summary.revenue_mentions.values,
            vec![60900.0, 47500.0, 10447.0]
        );
        assert_eq!(summary.revenue_mentions.max, Some(60900.0));

        let years = summary.year_mentions.iter().map(|(y, c)| (y.as_str(), *c));
        let years: Vec<_> = years.collect();
        assert_eq!(years, vec![("2024", 3), ("2023", 2)]);

        assert_eq!(
            summary.top_category(CategoryGroup::BusinessSegment),
            Some(("Data Center", 2))
        );
        assert_eq!(summary.technology_focus.get("AI"), Some(&1));
        assert_eq!(summary.technology_focus.get("Hopper"), Some(&1));
        assert_eq!(summary.market_insights.get("Export Controls"), Some(&1));

        assert_eq!(summary.percentage_stats.count, 3);
        assert_eq!(summary.percentage_stats.max, 126.0);
    }

    #[test]
    fn test_concurrent_matches_sequential() {
        let extractor = InsightExtractor::default();
        assert_eq!(
            extractor.extract(SAMPLE).unwrap(),
            extractor.extract_concurrent(SAMPLE).unwrap()
        );
    }

    #[test]
    fn test_extract_is_idempotent() {
        let extractor = InsightExtractor::default();
        assert_eq!(
            extractor.extract(SAMPLE).unwrap(),
            extractor.extract(SAMPLE).unwrap()
        );
    }

    #[test]
    fn test_empty_text_degrades_gracefully() {
        let summary = InsightExtractor::default().extract("").unwrap();

        assert!(summary.revenue_mentions.is_empty());
        assert!(summary.year_mentions.is_empty());
        assert_eq!(summary.percentage_stats, PercentageStats::default());
        assert_eq!(
            summary.business_segments.len(),
            Vocabulary::default()
                .categories_in(CategoryGroup::BusinessSegment)
                .len()
        );
        assert!(summary.business_segments.values().all(|c| *c == 0));
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocab = Vocabulary::from_categories(vec![
            CategoryDefinition::new("Cloud", CategoryGroup::BusinessSegment, ["azure", "aws"]),
            CategoryDefinition::new("Chips", CategoryGroup::Technology, ["silicon"]),
        ])
        .unwrap();
        let extractor = InsightExtractor::new(ExtractorConfig::with_vocabulary(vocab));

        let summary = extractor.extract("Azure and AWS run on our silicon.").unwrap();
        assert_eq!(summary.business_segments.get("Cloud"), Some(&2));
        assert_eq!(summary.technology_focus.get("Chips"), Some(&1));
        assert!(summary.market_insights.is_empty());
    }
}
