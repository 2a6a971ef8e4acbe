//! Derived financial metrics and key insights.
//!
//! [`analyze`] turns a [`FinancialDataset`] into an [`AnalysisSummary`]:
//! per-year margins and growth, segment growth and share of revenue for the
//! latest year, regional shares, product mix shares, and a list of short
//! human-readable insights built from those figures.

use crate::calc::{growth_rate, margin, percentage_point_change, share_of_total};
use crate::dataset::FinancialDataset;
use crate::error::{MetricsError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Margins and growth for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearMetrics {
    /// Fiscal year
    pub fiscal_year: i32,
    /// Revenue (millions)
    pub revenue: f64,
    /// Net income (millions)
    pub net_income: f64,
    /// Gross margin (%)
    pub gross_margin: Option<f64>,
    /// Operating margin (%)
    pub operating_margin: Option<f64>,
    /// Net margin (%)
    pub net_margin: Option<f64>,
    /// Revenue growth over the previous year (%)
    pub revenue_growth: Option<f64>,
    /// Net income growth over the previous year (%)
    pub net_income_growth: Option<f64>,
}

/// Segment revenue, growth and share for the latest fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentMetrics {
    /// Segment name
    pub name: String,
    /// Revenue in the latest year (millions)
    pub revenue: f64,
    /// Revenue in the previous year (millions)
    pub previous_revenue: Option<f64>,
    /// Growth over the previous year (%)
    pub growth: Option<f64>,
    /// Share of total company revenue (%)
    pub share_of_revenue: Option<f64>,
}

/// A region's share of latest-year revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionShare {
    /// Region name
    pub name: String,
    /// Revenue (millions)
    pub revenue: f64,
    /// Share of the regional total (%)
    pub share: f64,
}

/// Product mix for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixShare {
    /// Fiscal year
    pub fiscal_year: i32,
    /// Total across product lines (millions)
    pub total: f64,
    /// Share per product line (%)
    pub shares: IndexMap<String, f64>,
}

/// Headline analysis of a financial dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Company name
    pub company: String,
    /// Latest fiscal year
    pub fiscal_year: i32,
    /// Latest-year revenue (millions)
    pub total_revenue: f64,
    /// Latest-year revenue growth (%)
    pub revenue_growth_yoy: Option<f64>,
    /// Latest-year net income (millions)
    pub net_income: f64,
    /// Latest-year gross margin (%)
    pub gross_margin: Option<f64>,
    /// Latest-year operating margin (%)
    pub operating_margin: Option<f64>,
    /// Gross margin change over the previous year (percentage points)
    pub gross_margin_change_pp: Option<f64>,
    /// Operating margin change over the previous year (percentage points)
    pub operating_margin_change_pp: Option<f64>,
    /// Segment with the highest latest-year revenue
    pub largest_segment: Option<SegmentMetrics>,
    /// Per-year metrics, ascending
    pub years: Vec<YearMetrics>,
    /// Segment metrics, descending by revenue
    pub segments: Vec<SegmentMetrics>,
    /// Regional shares, descending by revenue
    pub regions: Vec<RegionShare>,
    /// Product mix per year, ascending
    pub product_mix: Vec<MixShare>,
    /// Reported ratios for the latest year
    pub ratios: IndexMap<String, f64>,
    /// Generated insight sentences
    pub key_insights: Vec<String>,
}

impl AnalysisSummary {
    /// Metrics for a specific year.
    pub fn year(&self, fiscal_year: i32) -> Option<&YearMetrics> {
        self.years.iter().find(|y| y.fiscal_year == fiscal_year)
    }

    /// Metrics for a segment by name.
    pub fn segment(&self, name: &str) -> Option<&SegmentMetrics> {
        self.segments.iter().find(|s| s.name == name)
    }

    /// Format as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        let (company, fiscal_year) = (&self.company, self.fiscal_year);
        output.push_str(&format!("# Financial Analysis: {company} (FY{fiscal_year})\n\n"));

        output.push_str("## Headline Metrics\n\n");
        let revenue = format_millions(self.total_revenue);
        output.push_str(&format!("- **Revenue:** {revenue}"));
        if let Some(growth) = self.revenue_growth_yoy {
            output.push_str(&format!(" ({})", format_signed_pct(growth)));
        }
        output.push('\n');
        let net_income = format_millions(self.net_income);
        output.push_str(&format!("- **Net Income:** {net_income}\n"));
        if let Some(gm) = self.gross_margin {
            output.push_str(&format!("- **Gross Margin:** {gm:.1}%\n"));
        }
        if let Some(om) = self.operating_margin {
            output.push_str(&format!("- **Operating Margin:** {om:.1}%\n"));
        }
        output.push('\n');

        output.push_str("## Fiscal Years\n\n");
        output.push_str("| Year | Revenue | Gross | Operating | Net | Growth |\n");
        output.push_str("|------|---------|-------|-----------|-----|--------|\n");
        for year in &self.years {
            output.push_str(&format!(
                "| FY{} | {} | {} | {} | {} | {} |\n",
                year.fiscal_year,
                format_millions(year.revenue),
                format_opt_pct(year.gross_margin),
                format_opt_pct(year.operating_margin),
                format_opt_pct(year.net_margin),
                format_opt_signed_pct(year.revenue_growth),
            ));
        }
        output.push('\n');

        if !self.segments.is_empty() {
            output.push_str("## Segments\n\n");
            output.push_str("| Segment | Revenue | Growth | Share |\n");
            output.push_str("|---------|---------|--------|-------|\n");
            for segment in &self.segments {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    segment.name,
                    format_millions(segment.revenue),
                    format_opt_signed_pct(segment.growth),
                    format_opt_pct(segment.share_of_revenue),
                ));
            }
            output.push('\n');
        }

        if !self.key_insights.is_empty() {
            output.push_str("## Key Insights\n\n");
            for insight in &self.key_insights {
                output.push_str(&format!("- {insight}\n"));
            }
        }

        output
    }
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (company, fiscal_year) = (&self.company, self.fiscal_year);
        writeln!(f, "Financial Analysis: {company} (FY{fiscal_year})")?;
        writeln!(f, "  Revenue: {}", format_millions(self.total_revenue))?;
        if let Some(growth) = self.revenue_growth_yoy {
            writeln!(f, "  Revenue Growth: {}", format_signed_pct(growth))?;
        }
        writeln!(f, "  Net Income: {}", format_millions(self.net_income))?;
        writeln!(f, "  Gross Margin: {}", format_opt_pct(self.gross_margin))?;
        let operating_margin = format_opt_pct(self.operating_margin);
        writeln!(f, "  Operating Margin: {operating_margin}")?;
        for insight in &self.key_insights {
            writeln!(f, "  * {insight}")?;
        }
        Ok(())
    }
}

/// Analyze a dataset.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidDataset`] if the dataset fails validation.
///
/// # Examples
///
/// ```
/// use hobart_metrics::{FinancialDataset, analyze};
///
/// let summary = analyze(&FinancialDataset::nvidia_fy2024())?;
/// assert_eq!(summary.fiscal_year, 2024);
/// assert_eq!(summary.largest_segment.unwrap().name, "Data Center");
/// # Ok::<(), hobart_metrics::MetricsError>(())
/// ```
pub fn analyze(dataset: &FinancialDataset) -> Result<AnalysisSummary> {
    dataset.validate()?;
    let latest = dataset
        .latest()
        .ok_or_else(|| MetricsError::InvalidDataset("no fiscal years".to_string()))?;
    let previous = dataset.previous();

    let years = year_metrics(dataset);
    let segments = segment_metrics(dataset);
    let regions = region_shares(dataset);
    let product_mix = mix_shares(dataset);

    let latest_metrics = years.last();
    let previous_metrics = years.iter().rev().nth(1);

    let ratios = dataset
        .ratios
        .iter()
        .filter_map(|r| {
            r.values_by_year
                .get(&latest.fiscal_year)
                .map(|v| (r.name.clone(), *v))
        })
        .collect();

    let mut summary = AnalysisSummary {
        company: dataset.company.clone(),
        fiscal_year: latest.fiscal_year,
        total_revenue: latest.revenue,
        revenue_growth_yoy: previous.and_then(|p| growth_rate(p.revenue, latest.revenue)),
        net_income: latest.net_income,
        gross_margin: latest_metrics.and_then(|m| m.gross_margin),
        operating_margin: latest_metrics.and_then(|m| m.operating_margin),
        gross_margin_change_pp: percentage_point_change(
            previous_metrics.and_then(|m| m.gross_margin),
            latest_metrics.and_then(|m| m.gross_margin),
        ),
        operating_margin_change_pp: percentage_point_change(
            previous_metrics.and_then(|m| m.operating_margin),
            latest_metrics.and_then(|m| m.operating_margin),
        ),
        largest_segment: segments.first().cloned(),
        years,
        segments,
        regions,
        product_mix,
        ratios,
        key_insights: Vec::new(),
    };
    summary.key_insights = key_insights(&summary, previous.map(|p| p.fiscal_year));

    info!(
        company = %summary.company,
        fiscal_year = summary.fiscal_year,
        insights = summary.key_insights.len(),
        "financial analysis complete"
    );
    Ok(summary)
}

fn year_metrics(dataset: &FinancialDataset) -> Vec<YearMetrics> {
    let mut metrics: Vec<YearMetrics> = Vec::with_capacity(dataset.fiscal_years.len());
    for (i, year) in dataset.fiscal_years.iter().enumerate() {
        let prior = i.checked_sub(1).map(|j| &dataset.fiscal_years[j]);
        metrics.push(YearMetrics {
            fiscal_year: year.fiscal_year,
            revenue: year.revenue,
            net_income: year.net_income,
            gross_margin: margin(year.gross_profit, year.revenue),
            operating_margin: margin(year.operating_income, year.revenue),
            net_margin: margin(year.net_income, year.revenue),
            revenue_growth: prior.and_then(|p| growth_rate(p.revenue, year.revenue)),
            net_income_growth: prior.and_then(|p| growth_rate(p.net_income, year.net_income)),
        });
    }
    metrics
}

fn segment_metrics(dataset: &FinancialDataset) -> Vec<SegmentMetrics> {
    let Some(latest) = dataset.latest() else {
        return Vec::new();
    };
    let previous_year = dataset.previous().map(|p| p.fiscal_year);

    let mut segments: Vec<SegmentMetrics> = dataset
        .segments
        .iter()
        .filter_map(|segment| {
            let Some(revenue) = segment.revenue(latest.fiscal_year) else {
                debug!(segment = %segment.name, "no revenue reported for latest year");
                return None;
            };
            let previous_revenue = previous_year.and_then(|y| segment.revenue(y));
            Some(SegmentMetrics {
                name: segment.name.clone(),
                revenue,
                previous_revenue,
                growth: previous_revenue.and_then(|p| growth_rate(p, revenue)),
                share_of_revenue: margin(revenue, latest.revenue),
            })
        })
        .collect();

    segments.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    segments
}

fn region_shares(dataset: &FinancialDataset) -> Vec<RegionShare> {
    let revenues: Vec<f64> = dataset.regions.iter().map(|r| r.revenue).collect();
    let mut regions: Vec<RegionShare> = dataset
        .regions
        .iter()
        .zip(share_of_total(&revenues))
        .map(|(region, share)| RegionShare {
            name: region.name.clone(),
            revenue: region.revenue,
            share,
        })
        .collect();

    regions.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    regions
}

fn mix_shares(dataset: &FinancialDataset) -> Vec<MixShare> {
    if dataset.product_mix.is_empty() {
        return Vec::new();
    }

    dataset
        .fiscal_years
        .iter()
        .filter_map(|year| {
            let lines: Vec<(&str, f64)> = dataset
                .product_mix
                .iter()
                .filter_map(|line| {
                    line.revenue(year.fiscal_year)
                        .map(|v| (line.name.as_str(), v))
                })
                .collect();
            if lines.is_empty() {
                return None;
            }

            let values: Vec<f64> = lines.iter().map(|(_, v)| *v).collect();
            let shares = lines
                .iter()
                .zip(share_of_total(&values))
                .map(|((name, _), share)| ((*name).to_string(), share))
                .collect();
            Some(MixShare {
                fiscal_year: year.fiscal_year,
                total: values.iter().sum(),
                shares,
            })
        })
        .collect()
}

fn key_insights(summary: &AnalysisSummary, previous_year: Option<i32>) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(growth) = summary.revenue_growth_yoy {
        let verb = if growth >= 100.0 {
            "more than doubled"
        } else if growth >= 0.0 {
            "grew"
        } else {
            "declined"
        };
        insights.push(format!(
            "Revenue {} year over year ({}) to {}",
            verb,
            format_signed_pct(growth),
            format_billions(summary.total_revenue)
        ));
    }

    if let Some(largest) = &summary.largest_segment {
        let mut sentence = format!("{} is the largest segment", largest.name);
        if let Some(growth) = largest.growth {
            sentence = format!(
                "{} segment {} {:.0}%",
                largest.name,
                if growth >= 0.0 { "grew" } else { "declined" },
                growth.abs()
            );
        }
        if let Some(share) = largest.share_of_revenue {
            sentence.push_str(&format!(" and accounts for {share:.0}% of total revenue"));
        }
        insights.push(sentence);
    }

    let since = previous_year.map_or_else(String::new, |y| format!(" in FY{y}"));
    for (label, change, current) in [
        (
            "Gross margin",
            summary.gross_margin_change_pp,
            summary.gross_margin,
        ),
        (
            "Operating margin",
            summary.operating_margin_change_pp,
            summary.operating_margin,
        ),
    ] {
        if let (Some(change), Some(current)) = (change, current) {
            let previous = current - change;
            let verb = if change >= 0.0 { "expanded" } else { "contracted" };
            let sentence = format!("{label} {verb} to {current:.1}% from {previous:.1}%{since}");
            insights.push(sentence);
        }
    }

    for segment in summary.segments.iter().skip(1) {
        if let Some(growth) = segment.growth {
            insights.push(format!(
                "{} revenue {} {:.0}% to {}",
                segment.name,
                if growth >= 0.0 { "grew" } else { "declined" },
                growth.abs(),
                format_billions(segment.revenue)
            ));
        }
    }

    if let Some(top) = summary.regions.first() {
        insights.push(format!(
            "{} is the largest region at {:.1}% of revenue across {} regions",
            top.name,
            top.share,
            summary.regions.len()
        ));
    }

    insights
}

fn format_millions(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}${grouped}M")
}

fn format_billions(value: f64) -> String {
    format!("${:.1}B", value / 1000.0)
}

fn format_signed_pct(value: f64) -> String {
    format!("{value:+.1}%")
}

fn format_opt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => "-".to_string(),
    }
}

fn format_opt_signed_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_signed_pct)
}
