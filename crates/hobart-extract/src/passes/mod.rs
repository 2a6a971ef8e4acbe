//! Extraction passes
//!
//! Each pass is a single regex or substring scan over the document text that
//! produces one field of the insight summary. Passes share no state and may
//! run in any order.

pub mod categories;
pub mod currency;
pub mod percentages;
pub mod years;

pub use categories::{count_category_occurrences, count_phrase_occurrences};
pub use currency::{CurrencyUnit, extract_currency_mentions};
pub use percentages::{PercentageStats, extract_percentage_stats};
pub use years::extract_year_mentions;
