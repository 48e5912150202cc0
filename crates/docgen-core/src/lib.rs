/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Document generation from templates and data mappings.
//!
//! Three entry points cover the supported flows:
//!
//! - [`generate_docx`] fills literal `{{key}}` placeholders in an existing
//!   DOCX template
//! - [`generate_docx_from_template`] renders Jinja-style template text and
//!   writes one paragraph per line
//! - [`generate_pdf`] renders template text (or uses the `title` and
//!   `content` keys directly) into a paginated PDF
//!
//! Each returns the path it wrote. Output directories are created as needed.
//! The free functions use [`GeneratorConfig::default`]; build a
//! [`Generator`] to change the substitution mode, undefined-variable
//! handling or PDF page setup.

pub mod config;
pub mod data;
pub mod emit;
pub mod error;
pub mod generator;
pub mod output;
pub mod render;

pub use config::{GeneratorConfig, PdfConfig};
pub use data::{DataMap, placeholder_replacements, value_to_string};
pub use emit::{StoryStyles, build_story, emit_docx};
pub use error::{GenerateError, Result};
pub use generator::{Generator, generate_docx, generate_docx_from_template, generate_pdf};
pub use render::TemplateRenderer;
