#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod document;
pub mod error;

pub use document::{DocumentKind, RawDocumentText, load_document};
pub use error::{Result, SourceError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
