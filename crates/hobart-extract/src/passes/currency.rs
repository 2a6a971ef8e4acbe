//! Currency amount mentions normalized to millions.

use crate::error::{ExtractError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    /// `$` + number with optional thousands separators and decimals + unit word.
    static ref CURRENCY_PATTERN: Regex =
        Regex::new(r"(?i)\$(\d+(?:,\d{3})*(?:\.\d+)?)\s*(billion|million)")
            .expect("valid currency pattern");
}

/// Unit word following a currency amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyUnit {
    /// Millions
    Million,
    /// Billions
    Billion,
}

impl CurrencyUnit {
    /// Parse a unit word (case-insensitive).
    pub fn parse(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("million") {
            Some(Self::Million)
        } else if word.eq_ignore_ascii_case("billion") {
            Some(Self::Billion)
        } else {
            None
        }
    }

    /// Factor converting an amount in this unit to millions.
    pub const fn to_millions(&self) -> f64 {
        match self {
            Self::Million => 1.0,
            Self::Billion => 1000.0,
        }
    }
}

/// Extract up to `limit` currency amounts, in document order, normalized to millions.
///
/// `"$1.5 billion"` yields `1500.0`, `"$200 million"` yields `200.0`.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedAmount`] if a matched literal fails to
/// parse. The pattern only admits well-formed numbers, so this indicates a bug.
pub fn extract_currency_mentions(text: &str, limit: usize) -> Result<Vec<f64>> {
    let mut amounts = Vec::new();

    for caps in CURRENCY_PATTERN.captures_iter(text).take(limit) {
        let literal = &caps[1];
        let unit_word = &caps[2];

        let unit = CurrencyUnit::parse(unit_word).ok_or_else(|| ExtractError::MalformedAmount {
            literal: caps[0].to_string(),
            reason: format!("unknown unit {unit_word:?}"),
        })?;
        let value: f64 = literal
            .replace(',', "")
            .parse()
            .map_err(|e: std::num::ParseFloatError| ExtractError::MalformedAmount {
                literal: caps[0].to_string(),
                reason: e.to_string(),
            })?;

        amounts.push(value * unit.to_millions());
    }

    debug!(matches = amounts.len(), limit, "currency pass complete");
    Ok(amounts)
}
