//! Error types for XML parsing and serialization.

use thiserror::Error;

/// Errors that can occur while parsing or writing an XML part.
#[derive(Debug, Clone, Error)]
pub enum XmlError {
    /// XML syntax error from quick-xml.
    #[error("XML syntax error: {message}{}", at_position(.position))]
    Syntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// Input ended with an element still open.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    /// Closing tag does not match the open element.
    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    /// No root element.
    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    /// More than one root element.
    #[error("Invalid XML: multiple root elements")]
    MultipleRoots,

    /// Failure while writing serialized XML.
    #[error("XML write error: {0}")]
    Write(String),
}

fn at_position(position: &Option<u64>) -> String {
    position
        .map(|pos| format!(" at byte {}", pos))
        .unwrap_or_default()
}

impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        XmlError::Syntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for XmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        XmlError::Syntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}

impl From<std::io::Error> for XmlError {
    fn from(err: std::io::Error) -> Self {
        XmlError::Write(err.to_string())
    }
}
