//! Error types for PDF output.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PdfError>;

/// Errors that can occur while writing a PDF.
///
/// Layout itself cannot fail: text that does not fit is wrapped or carried
/// over to a new page.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to write PDF: {0}")]
    Io(#[from] std::io::Error),
}
