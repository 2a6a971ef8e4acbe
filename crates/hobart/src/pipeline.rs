//! End-to-end document pipeline: load, extract, report.

use hobart_extract::{ExtractError, ExtractorConfig, InsightExtractor};
use hobart_output::{InsightReport, ReportBuilder, ReportError};
use hobart_source::{SourceError, load_document};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Result type for pipeline runs.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Any failure between reading a document and producing its report.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The document could not be loaded.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Extraction failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The report could not be assembled.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Company name recorded in the report.
    pub company: String,
    /// Report type recorded in the report.
    pub report_type: String,
    /// Extraction settings.
    pub config: ExtractorConfig,
    /// Run the extraction passes on worker threads.
    pub concurrent: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            company: hobart_output::DEFAULT_COMPANY.to_string(),
            report_type: hobart_output::DEFAULT_REPORT_TYPE.to_string(),
            config: ExtractorConfig::default(),
            concurrent: false,
        }
    }
}

/// Extract a report from text that is already in memory.
///
/// # Errors
///
/// Returns an error if extraction fails.
pub fn analyze_text(text: &str, options: &PipelineOptions) -> Result<InsightReport> {
    let extractor = InsightExtractor::new(options.config.clone());
    let summary = if options.concurrent {
        extractor.extract_concurrent(text)?
    } else {
        extractor.extract(text)?
    };

    Ok(ReportBuilder::new()
        .company(options.company.as_str())
        .report_type(options.report_type.as_str())
        .summary(summary)
        .build()?)
}

/// Load a document and extract its report.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or extraction fails.
///
/// # Examples
///
/// ```no_run
/// use hobart::pipeline::{PipelineOptions, analyze_document};
///
/// let report = analyze_document("NVIDIA-2024-Annual-Report.pdf", &PipelineOptions::default())?;
/// println!("{}", report.to_markdown());
/// # Ok::<(), hobart::pipeline::PipelineError>(())
/// ```
pub fn analyze_document(
    path: impl AsRef<Path>,
    options: &PipelineOptions,
) -> Result<InsightReport> {
    let document = load_document(path.as_ref())?;
    info!(
        path = %path.as_ref().display(),
        kind = %document.kind(),
        pages = document.page_count(),
        bytes = document.len(),
        "document loaded"
    );
    analyze_text(document.as_str(), options)
}
