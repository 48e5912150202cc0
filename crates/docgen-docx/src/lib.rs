/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! DOCX reading, writing and placeholder substitution.
//!
//! A DOCX file is an OPC package (a zip archive of XML parts). This crate
//! keeps the whole package in memory, parses the main document part into a
//! generic [`XmlElement`] tree and exposes a small document model on top of
//! it: body paragraphs, tables, rows, cells and runs. Markup the model does
//! not know about is carried through untouched when the document is saved.
//!
//! # Example
//!
//! ```no_run
//! use docgen_docx::{Document, Replacements, SubstitutionMode, substitute};
//!
//! let mut doc = Document::open("offer-template.docx")?;
//!
//! let mut replacements = Replacements::new();
//! replacements.insert("{{client}}".to_string(), "ACME".to_string());
//! substitute(&mut doc, &replacements, SubstitutionMode::Paragraph);
//!
//! doc.save("out/offer.docx")?;
//! # Ok::<(), docgen_docx::DocxError>(())
//! ```

pub mod document;
pub mod error;
pub mod package;
pub mod substitute;
pub mod xml;

pub use document::{Cell, Document, Paragraph, ParagraphMut, Row, Run, Table};
pub use error::{DocxError, Result};
pub use package::{Package, Part};
pub use substitute::{Replacements, SubstitutionMode, substitute};
pub use xml::{XmlAttribute, XmlChild, XmlDocument, XmlElement, XmlError};
