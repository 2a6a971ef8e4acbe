//! Financial dataset definitions.
//!
//! A [`FinancialDataset`] holds the reported figures for a company over a few
//! fiscal years: income statement lines, segment and product-line revenue,
//! regional revenue for the latest year and a handful of reported ratios.
//! Amounts are in millions of USD.

use crate::error::{MetricsError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Income statement lines for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalYearResults {
    /// Fiscal year (e.g., 2024)
    pub fiscal_year: i32,
    /// Total revenue
    pub revenue: f64,
    /// Gross profit
    pub gross_profit: f64,
    /// Operating income
    pub operating_income: f64,
    /// Net income
    pub net_income: f64,
}

impl FiscalYearResults {
    /// Create results for one fiscal year.
    pub const fn new(
        fiscal_year: i32,
        revenue: f64,
        gross_profit: f64,
        operating_income: f64,
        net_income: f64,
    ) -> Self {
        Self {
            fiscal_year,
            revenue,
            gross_profit,
            operating_income,
            net_income,
        }
    }
}

/// A revenue line (segment or product category) reported per fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueLine {
    /// Line name
    pub name: String,
    /// Revenue keyed by fiscal year
    pub revenue_by_year: IndexMap<i32, f64>,
}

impl RevenueLine {
    /// Create a revenue line from `(fiscal_year, revenue)` pairs.
    pub fn new(name: impl Into<String>, revenue: impl IntoIterator<Item = (i32, f64)>) -> Self {
        Self {
            name: name.into(),
            revenue_by_year: revenue.into_iter().collect(),
        }
    }

    /// Revenue for a fiscal year, if reported.
    pub fn revenue(&self, fiscal_year: i32) -> Option<f64> {
        self.revenue_by_year.get(&fiscal_year).copied()
    }
}

/// Revenue attributed to a geographic region in the latest fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRevenue {
    /// Region name
    pub name: String,
    /// Revenue
    pub revenue: f64,
}

impl RegionRevenue {
    /// Create a region entry.
    pub fn new(name: impl Into<String>, revenue: f64) -> Self {
        Self {
            name: name.into(),
            revenue,
        }
    }
}

/// A reported ratio (in percent) per fiscal year, e.g. R&D as % of revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSeries {
    /// Ratio name
    pub name: String,
    /// Values keyed by fiscal year
    pub values_by_year: IndexMap<i32, f64>,
}

impl RatioSeries {
    /// Create a ratio series from `(fiscal_year, value)` pairs.
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = (i32, f64)>) -> Self {
        Self {
            name: name.into(),
            values_by_year: values.into_iter().collect(),
        }
    }
}

/// Reported financial figures for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialDataset {
    /// Company name
    pub company: String,
    /// Income statement per fiscal year, ascending
    pub fiscal_years: Vec<FiscalYearResults>,
    /// Business segment revenue
    #[serde(default)]
    pub segments: Vec<RevenueLine>,
    /// Regional revenue for the latest fiscal year
    #[serde(default)]
    pub regions: Vec<RegionRevenue>,
    /// Product-line revenue
    #[serde(default)]
    pub product_mix: Vec<RevenueLine>,
    /// Other reported ratios
    #[serde(default)]
    pub ratios: Vec<RatioSeries>,
}

impl FinancialDataset {
    /// NVIDIA reported figures for fiscal years 2022 through 2024.
    pub fn nvidia_fy2024() -> Self {
        Self {
            company: "NVIDIA Corporation".to_string(),
            fiscal_years: vec![
                FiscalYearResults::new(2022, 26914.0, 16936.0, 10041.0, 9752.0),
                FiscalYearResults::new(2023, 26974.0, 15356.0, 4224.0, 4368.0),
                FiscalYearResults::new(2024, 60922.0, 44297.0, 32972.0, 29760.0),
            ],
            segments: vec![
                RevenueLine::new(
                    "Data Center",
                    [(2022, 10613.0), (2023, 15005.0), (2024, 47514.0)],
                ),
                RevenueLine::new("Gaming", [(2022, 12462.0), (2023, 9067.0), (2024, 10438.0)]),
                RevenueLine::new(
                    "Professional Visualization",
                    [(2022, 2111.0), (2023, 1544.0), (2024, 1544.0)],
                ),
                RevenueLine::new("Automotive", [(2022, 566.0), (2023, 903.0), (2024, 2906.0)]),
            ],
            regions: vec![
                RegionRevenue::new("United States", 13829.0),
                RegionRevenue::new("Taiwan", 11988.0),
                RegionRevenue::new("China", 10323.0),
                RegionRevenue::new("Singapore", 9662.0),
                RegionRevenue::new("Other", 15120.0),
            ],
            product_mix: vec![
                RevenueLine::new(
                    "Compute & Networking",
                    [(2022, 11046.0), (2023, 15068.0), (2024, 51274.0)],
                ),
                RevenueLine::new(
                    "Graphics",
                    [(2022, 15868.0), (2023, 11906.0), (2024, 9648.0)],
                ),
            ],
            ratios: vec![
                RatioSeries::new(
                    "R&D as % of Revenue",
                    [(2022, 21.4), (2023, 27.1), (2024, 12.7)],
                ),
                RatioSeries::new(
                    "SG&A as % of Revenue",
                    [(2022, 10.9), (2023, 14.1), (2024, 5.9)],
                ),
            ],
        }
    }

    /// Parse and validate a dataset from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the dataset is invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load and validate a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading financial dataset");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidDataset`] if there are no fiscal years,
    /// the years are not strictly ascending, or any revenue is negative.
    pub fn validate(&self) -> Result<()> {
        if self.fiscal_years.is_empty() {
            return Err(MetricsError::InvalidDataset(
                "at least one fiscal year is required".to_string(),
            ));
        }

        for pair in self.fiscal_years.windows(2) {
            if pair[1].fiscal_year <= pair[0].fiscal_year {
                return Err(MetricsError::InvalidDataset(format!(
                    "fiscal years must be strictly ascending: {} then {}",
                    pair[0].fiscal_year, pair[1].fiscal_year
                )));
            }
        }

        if let Some(year) = self.fiscal_years.iter().find(|y| y.revenue < 0.0) {
            return Err(MetricsError::InvalidDataset(format!(
                "negative revenue for fiscal year {}",
                year.fiscal_year
            )));
        }

        let lines = self.segments.iter().chain(&self.product_mix);
        for line in lines {
            if let Some((year, _)) = line.revenue_by_year.iter().find(|(_, v)| **v < 0.0) {
                return Err(MetricsError::InvalidDataset(format!(
                    "negative revenue for {} in fiscal year {}",
                    line.name, year
                )));
            }
        }

        if let Some(region) = self.regions.iter().find(|r| r.revenue < 0.0) {
            return Err(MetricsError::InvalidDataset(format!(
                "negative revenue for region {}",
                region.name
            )));
        }

        Ok(())
    }

    /// Results for the most recent fiscal year.
    pub fn latest(&self) -> Option<&FiscalYearResults> {
        self.fiscal_years.last()
    }

    /// Results for the fiscal year before the most recent one.
    pub fn previous(&self) -> Option<&FiscalYearResults> {
        self.fiscal_years.iter().rev().nth(1)
    }

    /// Results for a given fiscal year.
    pub fn year(&self, fiscal_year: i32) -> Option<&FiscalYearResults> {
        self.fiscal_years
            .iter()
            .find(|y| y.fiscal_year == fiscal_year)
    }

    /// Look up a segment by name.
    pub fn segment(&self, name: &str) -> Option<&RevenueLine> {
        self.segments.iter().find(|s| s.name == name)
    }
}

impl Default for FinancialDataset {
    fn default() -> Self {
        Self::nvidia_fy2024()
    }
}
