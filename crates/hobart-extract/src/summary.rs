//! Insight summary produced by the extractor.

use crate::passes::PercentageStats;
use crate::vocabulary::CategoryGroup;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Currency amounts mentioned in the document, in millions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueMentions {
    /// Amounts in document order.
    pub values: Vec<f64>,

    /// Largest amount, absent when there are no amounts.
    pub max: Option<f64>,

    /// Mean amount, absent when there are no amounts.
    pub average: Option<f64>,
}

impl RevenueMentions {
    /// Derive max and average from the amounts.
    pub fn from_values(values: Vec<f64>) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let average = values.iter().sum::<f64>() / values.len() as f64;
        Self {
            values,
            max: Some(max),
            average: Some(average),
        }
    }

    /// Number of amounts.
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no amounts were found.
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Structured summary of a single document.
///
/// Built once per document and not mutated afterwards. All category maps are
/// ordered by descending count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    /// Currency amounts normalized to millions.
    pub revenue_mentions: RevenueMentions,

    /// Top year mentions by count, ties to the later year.
    pub year_mentions: IndexMap<String, usize>,

    /// Business segment counts.
    pub business_segments: IndexMap<String, usize>,

    /// Technology term counts.
    pub technology_focus: IndexMap<String, usize>,

    /// Market and strategy theme counts.
    pub market_insights: IndexMap<String, usize>,

    /// Percentage value statistics.
    pub percentage_stats: PercentageStats,
}

impl InsightSummary {
    /// Counts for one category group.
    pub const fn category_counts(&self, group: CategoryGroup) -> &IndexMap<String, usize> {
        match group {
            CategoryGroup::BusinessSegment => &self.business_segments,
            CategoryGroup::Technology => &self.technology_focus,
            CategoryGroup::MarketTheme => &self.market_insights,
        }
    }

    /// Sum of all counts in a group.
    pub fn total_mentions(&self, group: CategoryGroup) -> usize {
        self.category_counts(group).values().sum()
    }

    /// Most mentioned category in a group, if it was mentioned at all.
    pub fn top_category(&self, group: CategoryGroup) -> Option<(&str, usize)> {
        self.category_counts(group)
            .first()
            .filter(|(_, count)| **count > 0)
            .map(|(label, count)| (label.as_str(), *count))
    }

    /// Most mentioned year.
    pub fn top_year(&self) -> Option<(&str, usize)> {
        self.year_mentions
            .first()
            .map(|(year, count)| (year.as_str(), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_mentions_empty() {
        let mentions = RevenueMentions::from_values(vec![]);
        assert!(mentions.is_empty());
        assert_eq!(mentions.max, None);
        assert_eq!(mentions.average, None);
    }

    #[test]
    fn test_revenue_mentions_derived() {
        let mentions = RevenueMentions::from_values(vec![1500.0, 200.0, 100.0]);
        assert_eq!(mentions.len(), 3);
        assert_eq!(mentions.max, Some(1500.0));
        assert_eq!(mentions.average, Some(600.0));
        assert_eq!(mentions.values, vec![1500.0, 200.0, 100.0]);
    }

    #[test]
    fn test_top_category() {
        let mut summary = InsightSummary::default();
        summary.business_segments.insert("Data Center".into(), 12);
        summary.business_segments.insert("Gaming".to_string(), 4);
        summary.market_insights.insert("China".to_string(), 0);

        assert_eq!(
            summary.top_category(CategoryGroup::BusinessSegment),
            Some(("Data Center", 12))
        );
        assert_eq!(summary.total_mentions(CategoryGroup::BusinessSegment), 16);
        assert_eq!(summary.top_category(CategoryGroup::MarketTheme), None);
        assert_eq!(summary.top_category(CategoryGroup::Technology), None);
    }
}
