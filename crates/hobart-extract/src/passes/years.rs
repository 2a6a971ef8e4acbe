//! Year mention frequency.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

lazy_static! {
    /// Whole-word four digit years 2000-2099.
    static ref YEAR_PATTERN: Regex = Regex::new(r"\b(20\d{2})\b").expect("valid year pattern");
}

/// Count year mentions and keep the `limit` most frequent.
///
/// Entries are ordered by descending count; ties go to the later year.
pub fn extract_year_mentions(text: &str, limit: usize) -> IndexMap<String, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for caps in YEAR_PATTERN.captures_iter(text) {
        if let Some(year) = caps.get(1) {
            *counts.entry(year.as_str()).or_insert(0) += 1;
        }
    }

    let distinct = counts.len();
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // Years are fixed-width, so string order is numeric order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(a.0)));
    ranked.truncate(limit);

    debug!(distinct, kept = ranked.len(), "year pass complete");
    ranked
        .into_iter()
        .map(|(year, count)| (year.to_string(), count))
        .collect()
}
