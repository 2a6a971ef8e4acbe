#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod calc;
pub mod dataset;
pub mod error;

pub use analysis::{AnalysisSummary, MixShare, RegionShare, SegmentMetrics, YearMetrics, analyze};
pub use dataset::{FinancialDataset, FiscalYearResults, RatioSeries, RegionRevenue, RevenueLine};
pub use error::{MetricsError, Result};
