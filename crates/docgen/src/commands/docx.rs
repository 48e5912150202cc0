/*
 * docx.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Docx command implementation
 */

//! `docgen docx`: fill the literal placeholders of a DOCX template.

use std::path::PathBuf;

use anyhow::{Context, Result};
use docgen_core::Generator;
use tracing::debug;

use crate::input::load_data;

/// Arguments for the docx command
#[derive(Debug)]
pub struct DocxArgs {
    pub template: PathBuf,
    pub data: Option<PathBuf>,
    pub defines: Vec<String>,
    pub output: PathBuf,
}

pub fn execute(generator: &Generator, args: DocxArgs) -> Result<PathBuf> {
    debug!(template = %args.template.display(), "docx");

    let data = load_data(args.data.as_deref(), &args.defines)?;
    generator
        .generate_docx(&args.template, &args.output, &data)
        .with_context(|| format!("Failed to generate {}", args.output.display()))
}
