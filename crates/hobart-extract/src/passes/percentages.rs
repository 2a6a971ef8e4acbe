//! Percentage value statistics.

use crate::error::{ExtractError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

lazy_static! {
    /// Integer or decimal number immediately followed by `%`.
    static ref PERCENT_PATTERN: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)%").expect("valid percentage pattern");
}

/// Summary statistics over percentage mentions.
///
/// All fields are zero when no plausible percentage was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentageStats {
    /// Number of values kept.
    pub count: usize,

    /// Arithmetic mean.
    pub average: f64,

    /// Largest value.
    pub max: f64,

    /// Smallest value.
    pub min: f64,
}

impl PercentageStats {
    /// Compute statistics over `values`.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let sum: f64 = values.iter().sum();
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);

        Self {
            count: values.len(),
            average: sum / values.len() as f64,
            max,
            min,
        }
    }

    /// Whether no percentages were found.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Collect percentage values below `outlier_threshold` and summarize them.
///
/// `"1500% increase and 42% margin"` with a threshold of 1000 yields
/// `{count: 1, average: 42, max: 42, min: 42}`.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedPercentage`] if a matched literal fails
/// to parse, which the pattern rules out.
pub fn extract_percentage_stats(text: &str, outlier_threshold: f64) -> Result<PercentageStats> {
    let mut values = Vec::new();
    let mut outliers = 0usize;

    for caps in PERCENT_PATTERN.captures_iter(text) {
        let literal = &caps[1];
        let value: f64 = literal
            .parse()
            .map_err(|e: std::num::ParseFloatError| ExtractError::MalformedPercentage {
                literal: caps[0].to_string(),
                reason: e.to_string(),
            })?;

        if value >= outlier_threshold {
            outliers += 1;
            continue;
        }
        values.push(value);
    }

    debug!(kept = values.len(), outliers, "percentage pass complete");
    Ok(PercentageStats::from_values(&values))
}
