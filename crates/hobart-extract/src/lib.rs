#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod extractor;
pub mod passes;
pub mod summary;
pub mod vocabulary;

pub use config::{
    ExtractorConfig, MAX_CURRENCY_MENTIONS, MAX_YEAR_MENTIONS, PERCENTAGE_OUTLIER_THRESHOLD,
};
pub use error::{ExtractError, Result};
pub use extractor::InsightExtractor;
pub use passes::{
    CurrencyUnit, PercentageStats, count_category_occurrences, count_phrase_occurrences,
    extract_currency_mentions, extract_percentage_stats, extract_year_mentions,
};
pub use summary::{InsightSummary, RevenueMentions};
pub use vocabulary::{CategoryDefinition, CategoryGroup, Vocabulary};
