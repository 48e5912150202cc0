/*
 * template.rs
 * Copyright (c) 2025 Posit, PBC
 */

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::flowable::Flowable;
use crate::geometry::{Margins, PageSize};
use crate::layout::{Frame, layout};
use crate::writer::write_pdf;

/// A page template bound to an output path.
#[derive(Debug, Clone)]
pub struct DocTemplate {
    path: PathBuf,
    page_size: PageSize,
    margins: Margins,
}

impl DocTemplate {
    /// A4 with 72pt side and top margins and an 18pt bottom margin.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            page_size: PageSize::default(),
            margins: Margins::default(),
        }
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frame(&self) -> Frame {
        Frame::new(self.page_size, &self.margins)
    }

    /// Lay out `story` and return the PDF bytes without touching the disk.
    pub fn render(&self, story: &[Flowable]) -> Vec<u8> {
        let pages = layout(story, &self.frame());
        debug!(
            flowables = story.len(),
            pages = pages.len(),
            "Laid out story"
        );
        write_pdf(&pages, self.page_size)
    }

    /// Lay out `story` and write it to the template's path. The parent
    /// directory must already exist.
    pub fn build(&self, story: &[Flowable]) -> Result<()> {
        let bytes = self.render(story);
        std::fs::write(&self.path, &bytes)?;
        info!(path = %self.path.display(), bytes = bytes.len(), "Wrote PDF");
        Ok(())
    }
}
