//! Error types for DOCX package handling.

use thiserror::Error;

use crate::xml::XmlError;

/// Result type alias for docgen-docx operations.
pub type Result<T> = std::result::Result<T, DocxError>;

/// Errors that can occur while reading, editing or writing a DOCX package.
#[derive(Debug, Error)]
pub enum DocxError {
    /// File-system error while reading or writing the package.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a readable zip archive.
    #[error("Invalid DOCX package: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A package part contains malformed XML.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// A part required to interpret the package is absent.
    #[error("Package part not found: {0}")]
    MissingPart(String),

    /// The main document part does not have the expected shape.
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),
}
