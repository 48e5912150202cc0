/*
 * docx_template.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Docx-template command implementation
 */

//! `docgen docx-template`: render template text into a new DOCX document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use docgen_core::Generator;
use tracing::debug;

use crate::input::{load_data, read_template};

/// Arguments for the docx-template command
#[derive(Debug)]
pub struct DocxTemplateArgs {
    pub template: PathBuf,
    pub data: Option<PathBuf>,
    pub defines: Vec<String>,
    pub output: PathBuf,
}

pub fn execute(generator: &Generator, args: DocxTemplateArgs) -> Result<PathBuf> {
    debug!(template = %args.template.display(), "docx-template");

    let template = read_template(&args.template)?;
    let data = load_data(args.data.as_deref(), &args.defines)?;
    generator
        .generate_docx_from_template(&template, &args.output, &data)
        .with_context(|| format!("Failed to generate {}", args.output.display()))
}
