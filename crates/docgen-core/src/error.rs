//! Error types for docgen-core

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Template not found: {}", .path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("Template syntax error{}: {message}", on_line(.line))]
    TemplateSyntax { message: String, line: Option<usize> },

    #[error("Undefined variable: {message}")]
    UndefinedVariable { message: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error(transparent)]
    Docx(#[from] docgen_docx::DocxError),

    #[error(transparent)]
    Pdf(#[from] docgen_pdf::PdfError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn on_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" on line {}", l)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, GenerateError>;
