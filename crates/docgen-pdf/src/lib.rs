/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Minimal flowable-based PDF output.
//!
//! A story is a list of [`Flowable`]s (styled paragraphs and vertical
//! spacers). [`DocTemplate::build`] word-wraps and paginates the story inside
//! the page margins and writes a PDF that uses the built-in Helvetica and
//! Helvetica-Bold Type 1 fonts, so no font files are embedded.
//!
//! ```no_run
//! use docgen_pdf::{DocTemplate, Flowable, StyleSheet};
//!
//! let styles = StyleSheet::sample();
//! let story = vec![
//!     Flowable::paragraph("Quarterly report", styles.heading1.clone()),
//!     Flowable::spacer(12.0),
//!     Flowable::paragraph("All figures are preliminary.", styles.normal.clone()),
//! ];
//!
//! DocTemplate::new("out/report.pdf").build(&story)?;
//! # Ok::<(), docgen_pdf::PdfError>(())
//! ```

pub mod encoding;
pub mod error;
pub mod flowable;
pub mod geometry;
pub mod layout;
pub mod metrics;
pub mod style;
pub mod template;
mod writer;

pub use error::{PdfError, Result};
pub use flowable::{Flowable, Paragraph};
pub use geometry::{Margins, PageSize};
pub use layout::{Frame, Page, PlacedLine};
pub use style::{Alignment, Color, Font, ParagraphStyle, StyleSheet};
pub use template::DocTemplate;
