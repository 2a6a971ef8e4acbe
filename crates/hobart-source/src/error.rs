//! Error types for document loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors that can occur while loading a source document.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The document does not exist
    #[error("Source document not found: {}", path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// IO error while reading the document
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Text extraction from a PDF failed
    #[error("PDF text extraction failed for {}: {reason}", path.display())]
    PdfExtraction {
        /// Path of the PDF
        path: PathBuf,
        /// Reason reported by the extractor
        reason: String,
    },
}
