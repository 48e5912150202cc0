/*
 * generator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The three generation entry points.

use std::path::{Path, PathBuf};

use docgen_docx::{Document, substitute};
use docgen_pdf::DocTemplate;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::data::{DataMap, placeholder_replacements};
use crate::emit::{StoryStyles, build_story, emit_docx};
use crate::error::{GenerateError, Result};
use crate::output::ensure_parent_dir;
use crate::render::TemplateRenderer;

/// Document generator carrying its configuration.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    fn renderer(&self) -> TemplateRenderer {
        TemplateRenderer::new(self.config.strict_undefined)
    }

    /// Fill the literal `{{key}}` / `{{ key }}` placeholders of an existing
    /// DOCX template and save the result to `output_path`.
    pub fn generate_docx(
        &self,
        template_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        data: &DataMap,
    ) -> Result<PathBuf> {
        let template_path = template_path.as_ref();
        let output_path = output_path.as_ref();

        if !template_path.is_file() {
            return Err(GenerateError::TemplateNotFound {
                path: template_path.to_path_buf(),
            });
        }

        let mut document = Document::open(template_path)?;
        let replacements = placeholder_replacements(data);
        let changed = substitute(&mut document, &replacements, self.config.substitution);
        debug!(
            template = %template_path.display(),
            keys = data.len(),
            paragraphs = changed,
            "Filled DOCX template"
        );

        ensure_parent_dir(output_path)?;
        document.save(output_path)?;
        info!(path = %output_path.display(), "Wrote DOCX");
        Ok(output_path.to_path_buf())
    }

    /// Render `template` and write one paragraph per resulting line to a
    /// fresh DOCX document.
    pub fn generate_docx_from_template(
        &self,
        template: &str,
        output_path: impl AsRef<Path>,
        data: &DataMap,
    ) -> Result<PathBuf> {
        let output_path = output_path.as_ref();

        let rendered = self.renderer().render(template, data)?;
        let mut document = emit_docx(&rendered)?;

        ensure_parent_dir(output_path)?;
        document.save(output_path)?;
        info!(path = %output_path.display(), "Wrote DOCX");
        Ok(output_path.to_path_buf())
    }

    /// Write a PDF built either from rendered template lines or directly
    /// from the `title` and `content` keys of `data`.
    pub fn generate_pdf(
        &self,
        output_path: impl AsRef<Path>,
        data: &DataMap,
        template: Option<&str>,
    ) -> Result<PathBuf> {
        let output_path = output_path.as_ref();
        let pdf = &self.config.pdf;

        ensure_parent_dir(output_path)?;
        let styles = StoryStyles::new(pdf.spacer_height);
        let story = build_story(data, template, &self.renderer(), &styles)?;

        DocTemplate::new(output_path)
            .page_size(pdf.page_size)
            .margins(pdf.margins)
            .build(&story)?;
        Ok(output_path.to_path_buf())
    }
}

/// [`Generator::generate_docx`] with the default configuration.
pub fn generate_docx(
    template_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    data: &DataMap,
) -> Result<PathBuf> {
    Generator::default().generate_docx(template_path, output_path, data)
}

/// [`Generator::generate_docx_from_template`] with the default configuration.
pub fn generate_docx_from_template(
    template: &str,
    output_path: impl AsRef<Path>,
    data: &DataMap,
) -> Result<PathBuf> {
    Generator::default().generate_docx_from_template(template, output_path, data)
}

/// [`Generator::generate_pdf`] with the default configuration.
pub fn generate_pdf(
    output_path: impl AsRef<Path>,
    data: &DataMap,
    template: Option<&str>,
) -> Result<PathBuf> {
    Generator::default().generate_pdf(output_path, data, template)
}
