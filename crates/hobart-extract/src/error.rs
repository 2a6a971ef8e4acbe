//! Error types for insight extraction.

use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur during extraction.
///
/// Empty match sets are never errors. The malformed-literal variants signal a
/// token that satisfied a pass's pattern but could not be parsed, which the
/// patterns are built to rule out.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A currency amount matched the pattern but did not parse
    #[error("Malformed currency amount {literal:?}: {reason}")]
    MalformedAmount {
        /// The matched literal
        literal: String,
        /// Parser message
        reason: String,
    },

    /// A percentage matched the pattern but did not parse
    #[error("Malformed percentage {literal:?}: {reason}")]
    MalformedPercentage {
        /// The matched literal
        literal: String,
        /// Parser message
        reason: String,
    },

    /// Invalid vocabulary definition
    #[error("Invalid vocabulary: {0}")]
    Vocabulary(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
