//! Error types for financial analysis.

use thiserror::Error;

/// Result type for metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors that can occur while loading or analyzing a dataset.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Dataset failed validation
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
