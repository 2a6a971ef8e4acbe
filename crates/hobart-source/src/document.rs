//! Raw document text and loaders.
//!
//! A [`RawDocumentText`] is produced once per input file and is never mutated
//! afterwards. PDF pages are concatenated in page order.

use crate::error::{Result, SourceError};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Page separator emitted by PDF text extractors.
const PAGE_BREAK: char = '\u{000C}';

/// Kind of source document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Portable Document Format; text is extracted page by page.
    Pdf,
    /// Anything else, read as UTF-8 text.
    PlainText,
}

impl DocumentKind {
    /// Determine the document kind from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => Self::Pdf,
            _ => Self::PlainText,
        }
    }

    /// Short lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::PlainText => "text",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Full concatenated text of a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocumentText {
    text: String,
    path: Option<PathBuf>,
    kind: DocumentKind,
}

impl RawDocumentText {
    /// Wrap text that was obtained elsewhere.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
            kind: DocumentKind::PlainText,
        }
    }

    /// The document text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes.
    pub const fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the document contains no text at all.
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of form-feed separated pages (at least 1).
    pub fn page_count(&self) -> usize {
        let body = self.text.trim_end_matches(PAGE_BREAK);
        body.matches(PAGE_BREAK).count() + 1
    }

    /// Path the document was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Kind of the source document.
    pub const fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Consume the document and return the text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for RawDocumentText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Load a document from disk.
///
/// PDF files (by extension) have their text extracted with `pdf-extract`;
/// every other file is read as UTF-8. An empty document is returned as-is,
/// only a missing or unreadable file is an error.
///
/// # Errors
///
/// Returns [`SourceError::NotFound`] if the path does not exist,
/// [`SourceError::Io`] if it cannot be read and
/// [`SourceError::PdfExtraction`] if the PDF text cannot be extracted.
pub fn load_document(path: impl AsRef<Path>) -> Result<RawDocumentText> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SourceError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let kind = DocumentKind::from_path(path);
    debug!(path = %path.display(), %kind, "loading source document");

    let text = match kind {
        DocumentKind::Pdf => {
            let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            extract_pdf_text(path, &bytes)?
        }
        DocumentKind::PlainText => {
            std::fs::read_to_string(path).map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })?
        }
    };

    let doc = RawDocumentText {
        text,
        path: Some(path.to_path_buf()),
        kind,
    };
    info!(
        path = %path.display(),
        bytes = doc.len(),
        pages = doc.page_count(),
        "loaded source document"
    );
    Ok(doc)
}

/// Extract PDF text, turning both errors and panics in `pdf-extract` into
/// [`SourceError::PdfExtraction`]. The library panics on some malformed fonts
/// and encodings instead of returning an error.
fn extract_pdf_text(path: &Path, bytes: &[u8]) -> Result<String> {
    let extract = || pdf_extract::extract_text_from_mem(bytes);
    let result = panic::catch_unwind(AssertUnwindSafe(extract));
    let reason = match result {
        Ok(Ok(text)) => return Ok(text),
        Ok(Err(e)) => e.to_string(),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!(path = %path.display(), %message, "pdf extraction panicked");
            format!("malformed document: {message}")
        }
    };
    Err(SourceError::PdfExtraction {
        path: path.to_path_buf(),
        reason,
    })
}
