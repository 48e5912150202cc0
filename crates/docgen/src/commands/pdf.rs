/*
 * pdf.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `docgen pdf`: render a PDF from template text, or from the `title` and
//! `content` keys when no template is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use docgen_core::Generator;
use tracing::debug;

use crate::input::{load_data, read_template};

/// Arguments for the pdf command
#[derive(Debug)]
pub struct PdfArgs {
    pub template: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub defines: Vec<String>,
    pub output: PathBuf,
}

pub fn execute(generator: &Generator, args: PdfArgs) -> Result<PathBuf> {
    let template = match &args.template {
        Some(path) => {
            debug!(template = %path.display(), "pdf");
            Some(read_template(path)?)
        }
        None => {
            debug!("pdf (direct)");
            None
        }
    };

    let data = load_data(args.data.as_deref(), &args.defines)?;
    generator
        .generate_pdf(&args.output, &data, template.as_deref())
        .with_context(|| format!("Failed to generate {}", args.output.display()))
}
