/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Generator configuration.
//!
//! Every field has a default, so an empty file (or no file at all) gives
//! the stock behaviour:
//!
//! ```yaml
//! strict-undefined: false
//! substitution: paragraph
//! pdf:
//!   page-size: a4
//!   margins: { left: 72, right: 72, top: 72, bottom: 18 }
//!   spacer-height: 12
//! ```

use std::path::Path;

use docgen_docx::SubstitutionMode;
use docgen_pdf::{Margins, PageSize};
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Fail on undefined template variables instead of rendering them empty.
    pub strict_undefined: bool,
    pub substitution: SubstitutionMode,
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PdfConfig {
    pub page_size: PageSize,
    pub margins: Margins,
    /// Gap inserted after every paragraph of a story.
    pub spacer_height: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margins: Margins::default(),
            spacer_height: 12.0,
        }
    }
}

impl GeneratorConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        parse(source).map_err(|e| GenerateError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        parse(&source).map_err(|e| GenerateError::Config(format!("{}: {}", path.display(), e)))
    }
}

fn parse(source: &str) -> std::result::Result<GeneratorConfig, serde_yaml::Error> {
    if source.trim().is_empty() {
        return Ok(GeneratorConfig::default());
    }
    serde_yaml::from_str(source)
}
