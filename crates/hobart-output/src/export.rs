//! Export functionality for insight reports and financial analyses.
//!
//! JSON exports are the serde serialization of the record. CSV exports flatten
//! a record into `section,label,value` rows.

use crate::report::InsightReport;
use hobart_extract::CategoryGroup;
use hobart_metrics::AnalysisSummary;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated `section,label,value` rows.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess the format from a file extension, preferring pretty JSON.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::PrettyJson)
        } else {
            None
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "prettyjson" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// One flattened CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    /// Report section, e.g. `key_metrics.year_mentions`.
    pub section: String,

    /// Entry label within the section.
    pub label: String,

    /// Numeric value. Empty in CSV when absent.
    pub value: Option<f64>,
}

impl FlatRecord {
    fn new(section: &str, label: impl Into<String>, value: impl Into<Option<f64>>) -> Self {
        Self {
            section: section.to_string(),
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter: Serialize {
    /// Flatten into `section,label,value` records for CSV export.
    fn to_flat_records(&self) -> Vec<FlatRecord>;

    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self.to_flat_records() {
                    wtr.serialize(&record)?;
                }
                let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
                String::from_utf8(bytes)
                    .map_err(|e| ExportError::InvalidFormat(format!("CSV is not UTF-8: {e}")))
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for InsightReport {
    fn to_flat_records(&self) -> Vec<FlatRecord> {
        let mut records = Vec::new();

        let revenue = &self.key_metrics.revenue_mentions;
        for (i, value) in revenue.values.iter().enumerate() {
            records.push(FlatRecord::new(
                "key_metrics.revenue_mentions",
                (i + 1).to_string(),
                *value,
            ));
        }
        records.push(FlatRecord::new("key_metrics.revenue_mentions", "max", revenue.max));
        records.push(FlatRecord::new("key_metrics.revenue_mentions", "average", revenue.average));

        for (year, count) in &self.key_metrics.year_mentions {
            records.push(FlatRecord::new("key_metrics.year_mentions", year.clone(), *count as f64));
        }

        for group in CategoryGroup::all() {
            for (label, count) in self.category_counts(group) {
                records.push(FlatRecord::new(group.key(), label.clone(), *count as f64));
            }
        }

        let pct = &self.financial_highlights.percentage_mentions;
        let section = "financial_highlights.percentage_mentions";
        records.push(FlatRecord::new(section, "count", pct.count as f64));
        records.push(FlatRecord::new(section, "average", pct.average));
        records.push(FlatRecord::new(section, "max", pct.max));
        records.push(FlatRecord::new(section, "min", pct.min));

        records
    }
}

impl Exporter for AnalysisSummary {
    fn to_flat_records(&self) -> Vec<FlatRecord> {
        let mut records = vec![
            FlatRecord::new("headline", "total_revenue", self.total_revenue),
            FlatRecord::new("headline", "revenue_growth_yoy", self.revenue_growth_yoy),
            FlatRecord::new("headline", "net_income", self.net_income),
            FlatRecord::new("headline", "gross_margin", self.gross_margin),
            FlatRecord::new("headline", "operating_margin", self.operating_margin),
            FlatRecord::new(
                "headline",
                "gross_margin_change_pp",
                self.gross_margin_change_pp,
            ),
            FlatRecord::new(
                "headline",
                "operating_margin_change_pp",
                self.operating_margin_change_pp,
            ),
        ];

        for year in &self.years {
            let section = format!("fy{}", year.fiscal_year);
            records.push(FlatRecord::new(&section, "revenue", year.revenue));
            records.push(FlatRecord::new(&section, "net_income", year.net_income));
            records.push(FlatRecord::new(&section, "gross_margin", year.gross_margin));
            records.push(FlatRecord::new(&section, "operating_margin", year.operating_margin));
            records.push(FlatRecord::new(&section, "net_margin", year.net_margin));
            records.push(FlatRecord::new(&section, "revenue_growth", year.revenue_growth));
        }

        for segment in &self.segments {
            let section = format!("segment.{}", segment.name);
            records.push(FlatRecord::new(&section, "revenue", segment.revenue));
            records.push(FlatRecord::new(&section, "growth", segment.growth));
            records.push(FlatRecord::new(&section, "share", segment.share_of_revenue));
        }

        for region in &self.regions {
            records.push(FlatRecord::new("region_share", region.name.clone(), region.share));
        }

        for (name, value) in &self.ratios {
            records.push(FlatRecord::new("ratio", name.clone(), *value));
        }

        records
    }
}
