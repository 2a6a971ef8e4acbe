//! Insight report record.
//!
//! An [`InsightReport`] wraps an [`InsightSummary`] with the company name,
//! report type and extraction timestamp, laid out in the nested shape that is
//! written to disk.

use chrono::{DateTime, Utc};
use hobart_extract::{CategoryGroup, InsightSummary, PercentageStats, RevenueMentions};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default company name.
pub const DEFAULT_COMPANY: &str = "NVIDIA Corporation";

/// Default report type.
pub const DEFAULT_REPORT_TYPE: &str = "Annual Report";

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Builder was finished without a summary.
    #[error("Missing summary: a report needs an extracted summary")]
    MissingSummary,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Currency and year mentions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// Currency amounts in millions.
    pub revenue_mentions: RevenueMentions,

    /// Year mention counts.
    pub year_mentions: IndexMap<String, usize>,
}

/// Percentage statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialHighlights {
    /// Statistics over plausible percentage values.
    pub percentage_mentions: PercentageStats,
}

/// Structured insight report for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Company the report is about.
    pub company: String,

    /// Kind of document, e.g. "Annual Report".
    pub report_type: String,

    /// When the extraction ran.
    pub extraction_date: DateTime<Utc>,

    /// Currency and year mentions.
    pub key_metrics: KeyMetrics,

    /// Business segment counts.
    pub business_segments: IndexMap<String, usize>,

    /// Percentage statistics.
    pub financial_highlights: FinancialHighlights,

    /// Market and strategy theme counts.
    pub market_insights: IndexMap<String, usize>,

    /// Technology term counts.
    pub technology_focus: IndexMap<String, usize>,
}

impl InsightReport {
    /// Create a report stamped with the current time.
    pub fn from_summary(
        company: impl Into<String>,
        report_type: impl Into<String>,
        summary: InsightSummary,
    ) -> Self {
        Self::with_date(company, report_type, Utc::now(), summary)
    }

    /// Create a report with an explicit extraction date.
    pub fn with_date(
        company: impl Into<String>,
        report_type: impl Into<String>,
        extraction_date: DateTime<Utc>,
        summary: InsightSummary,
    ) -> Self {
        let InsightSummary {
            revenue_mentions,
            year_mentions,
            business_segments,
            technology_focus,
            market_insights,
            percentage_stats,
        } = summary;

        Self {
            company: company.into(),
            report_type: report_type.into(),
            extraction_date,
            key_metrics: KeyMetrics {
                revenue_mentions,
                year_mentions,
            },
            business_segments,
            financial_highlights: FinancialHighlights {
                percentage_mentions: percentage_stats,
            },
            market_insights,
            technology_focus,
        }
    }

    /// Counts for one category group.
    pub const fn category_counts(&self, group: CategoryGroup) -> &IndexMap<String, usize> {
        match group {
            CategoryGroup::BusinessSegment => &self.business_segments,
            CategoryGroup::Technology => &self.technology_focus,
            CategoryGroup::MarketTheme => &self.market_insights,
        }
    }

    /// Convert report to a pretty JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Format the report as an ASCII table.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}: {}\n", self.report_type, self.company));
        let extracted = self.extraction_date.format("%Y-%m-%d %H:%M:%S UTC");
        output.push_str(&format!("Extracted: {extracted}\n"));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        let revenue = &self.key_metrics.revenue_mentions;
        output.push_str("\nKey Metrics:\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        let largest = format_opt_millions(revenue.max);
        let average = format_opt_millions(revenue.average);
        output.push_str(&format!("  {:<30} {:>20}\n", "Currency Mentions:", revenue.len()));
        output.push_str(&format!("  {:<30} {largest:>20}\n", "Largest Amount:"));
        output.push_str(&format!("  {:<30} {average:>20}\n", "Average Amount:"));

        let pct = &self.financial_highlights.percentage_mentions;
        output.push_str(&format!("  {:<30} {:>20}\n", "Percentages:", pct.count));
        if !pct.is_empty() {
            let range = format!("{:.1}% - {:.1}%", pct.min, pct.max);
            output.push_str(&format!("  {:<30} {range:>20}\n", "Percentage Range:"));
            output.push_str(&format!("  {:<30} {:>19.2}%\n", "Average Percentage:", pct.average));
        }

        if !self.key_metrics.year_mentions.is_empty() {
            output.push_str("\nYear Mentions:\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for (year, count) in &self.key_metrics.year_mentions {
                output.push_str(&format!("  {year:<30} {count:>20}\n"));
            }
        }

        for group in CategoryGroup::all() {
            output.push_str(&format!("\n{}:\n", group.name()));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for (label, count) in self.category_counts(group) {
                output.push_str(&format!("  {label:<30} {count:>20}\n"));
            }
        }

        output.push_str(&"=".repeat(60));
        output.push('\n');
        output
    }

    /// Format the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}: {}\n\n", self.report_type, self.company));
        let extracted = self.extraction_date.to_rfc3339();
        output.push_str(&format!("*Extracted {extracted}*\n\n"));

        let revenue = &self.key_metrics.revenue_mentions;
        output.push_str("## Key Metrics\n\n");
        if revenue.is_empty() {
            output.push_str("- No currency amounts found\n");
        } else {
            let amounts: Vec<String> = revenue.values.iter().map(|v| format_millions(*v)).collect();
            let (largest, average) = (revenue.max, revenue.average);
            output.push_str(&format!("- **Currency mentions:** {}\n", amounts.join(", ")));
            output.push_str(&format!("- **Largest:** {}\n", format_opt_millions(largest)));
            output.push_str(&format!("- **Average:** {}\n", format_opt_millions(average)));
        }

        let pct = &self.financial_highlights.percentage_mentions;
        output.push_str(&format!(
            "- **Percentages:** {} (average {:.2}%, max {:.1}%, min {:.1}%)\n\n",
            pct.count, pct.average, pct.max, pct.min
        ));

        if !self.key_metrics.year_mentions.is_empty() {
            output.push_str("## Year Mentions\n\n");
            output.push_str("| Year | Mentions |\n");
            output.push_str("|------|----------|\n");
            for (year, count) in &self.key_metrics.year_mentions {
                output.push_str(&format!("| {year} | {count} |\n"));
            }
            output.push('\n');
        }

        for group in CategoryGroup::all() {
            let counts = self.category_counts(group);
            output.push_str(&format!("## {}\n\n", group.name()));
            if counts.values().all(|c| *c == 0) {
                output.push_str("No mentions.\n\n");
                continue;
            }
            output.push_str("| Category | Mentions |\n");
            output.push_str("|----------|----------|\n");
            for (label, count) in counts.iter().filter(|(_, c)| **c > 0) {
                output.push_str(&format!("| {label} | {count} |\n"));
            }
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for InsightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    company: Option<String>,
    report_type: Option<String>,
    extraction_date: Option<DateTime<Utc>>,
    summary: Option<InsightSummary>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the company name.
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set the report type.
    pub fn report_type(mut self, report_type: impl Into<String>) -> Self {
        self.report_type = Some(report_type.into());
        self
    }

    /// Set the extraction timestamp. Defaults to now.
    pub const fn extraction_date(mut self, date: DateTime<Utc>) -> Self {
        self.extraction_date = Some(date);
        self
    }

    /// Set the extracted summary.
    pub fn summary(mut self, summary: InsightSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Build the report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingSummary`] if no summary was set.
    pub fn build(self) -> Result<InsightReport, ReportError> {
        let summary = self.summary.ok_or(ReportError::MissingSummary)?;
        Ok(InsightReport::with_date(
            self.company.unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            self.report_type
                .unwrap_or_else(|| DEFAULT_REPORT_TYPE.to_string()),
            self.extraction_date.unwrap_or_else(Utc::now),
            summary,
        ))
    }
}

fn format_millions(value: f64) -> String {
    if value >= 1000.0 {
        format!("${:.2}B", value / 1000.0)
    } else {
        format!("${value:.1}M")
    }
}

fn format_opt_millions(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_millions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hobart_extract::InsightExtractor;

    fn sample_summary() -> InsightSummary {
        InsightExtractor::default()
            .extract(
                "Revenue was $60.9 billion in 2024, up 126%. Data Center revenue \
                 was $47.5 billion. Gaming grew 15% on RTX demand in 2024.",
            )
            .unwrap()
    }

    #[test]
    fn test_report_from_summary() {
        let summary = sample_summary();
        let report =
            InsightReport::from_summary("NVIDIA Corporation", "Annual Report", summary.clone());

        assert_eq!(report.company, "NVIDIA Corporation");
        assert_eq!(
            report.key_metrics.revenue_mentions,
            summary.revenue_mentions
        );
        assert_eq!(report.key_metrics.year_mentions["2024"], 2);
        assert_eq!(report.financial_highlights.percentage_mentions.count, 2);
        assert_eq!(report.business_segments, summary.business_segments);
    }

    #[test]
    fn test_report_builder() {
        let date = Utc.with_ymd_and_hms(2024, 2, 21, 12, 0, 0).unwrap();
        let report = ReportBuilder::new()
            .company("Acme")
            .report_type("10-K")
            .extraction_date(date)
            .summary(sample_summary())
            .build()
            .unwrap();

        assert_eq!(report.company, "Acme");
        assert_eq!(report.report_type, "10-K");
        assert_eq!(report.extraction_date, date);
    }

    #[test]
    fn test_report_builder_defaults() {
        let report = ReportBuilder::new()
            .summary(InsightSummary::default())
            .build()
            .unwrap();
        assert_eq!(report.company, DEFAULT_COMPANY);
        assert_eq!(report.report_type, DEFAULT_REPORT_TYPE);
    }

    #[test]
    fn test_report_builder_requires_summary() {
        assert!(matches!(
            ReportBuilder::new().company("Acme").build(),
            Err(ReportError::MissingSummary)
        ));
    }

    #[test]
    fn test_report_error_variants() {
        let invalid: serde_json::Error = serde_json::from_str::<InsightReport>("{").unwrap_err();
        for err in [ReportError::MissingSummary, ReportError::from(invalid)] {
            let message = err.to_string();
            match err {
                ReportError::MissingSummary => assert!(message.starts_with("Missing summary")),
                ReportError::Serialization(_) => {
                    assert!(message.starts_with("Serialization error"))
                }
            }
        }
    }

    #[test]
    fn test_top_level_field_order() {
        let report = InsightReport::from_summary("NVIDIA", "Annual Report", sample_summary());
        let json = report.to_json().unwrap();

        let fields = [
            "\"company\"",
            "\"report_type\"",
            "\"extraction_date\"",
            "\"key_metrics\"",
            "\"business_segments\"",
            "\"financial_highlights\"",
            "\"market_insights\"",
            "\"technology_focus\"",
        ];
        let positions: Vec<usize> = fields.iter().map(|f| json.find(f).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_markdown_and_table() {
        let report = InsightReport::from_summary("NVIDIA", "Annual Report", sample_summary());

        let md = report.to_markdown();
        assert!(md.contains("# Annual Report: NVIDIA"));
        assert!(md.contains("$60.90B, $47.50B"));
        assert!(md.contains("| Data Center | 1 |"));
        assert!(md.contains("| RTX | 1 |"));

        let table = report.to_ascii_table();
        assert!(table.contains("Business Segments:"));
        assert!(table.contains("Technology Focus:"));
        assert!(table.contains("Market Insights:"));
        assert!(table.contains("$60.90B"));
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_millions(1500.0), "$1.50B");
        assert_eq!(format_millions(200.0), "$200.0M");
        assert_eq!(format_opt_millions(None), "-");
    }
}
