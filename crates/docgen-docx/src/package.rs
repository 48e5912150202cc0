/*
 * package.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! OPC package container.
//!
//! A DOCX file is a zip archive of parts. [`Package`] reads every part into
//! memory in archive order and writes them back in the same order, so parts
//! this crate never interprets (styles, numbering, media, ...) survive a
//! load/save cycle byte for byte.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{DocxError, Result};
use crate::xml;

/// Location of the package relationships part.
pub const PACKAGE_RELS: &str = "_rels/.rels";

/// Main document part used when the relationships part does not name one.
pub const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";

/// Suffix shared by the transitional and strict officeDocument relationship types.
const OFFICE_DOCUMENT_REL_SUFFIX: &str = "/officeDocument";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// A named part of the package.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Part name as stored in the archive, without a leading slash.
    pub name: String,
    pub data: Vec<u8>,
}

/// An in-memory OPC package.
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: Vec<Part>,
}

impl Package {
    /// Create a package with no parts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the skeleton of a word-processing package: content types and
    /// package relationships pointing at `word/document.xml`. The document
    /// part itself is left for the caller to set.
    pub fn blank_document() -> Self {
        let mut package = Self::new();
        package.set_part("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes().to_vec());
        package.set_part(PACKAGE_RELS, PACKAGE_RELS_XML.as_bytes().to_vec());
        package
    }

    /// Read a package from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening package");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a package from any seekable source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;
            parts.push(Part { name, data });
        }

        debug!(parts = parts.len(), "Read package");
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Look up a part by name. A leading slash is ignored.
    pub fn part(&self, name: &str) -> Option<&Part> {
        let name = normalize_part_name(name);
        self.parts.iter().find(|p| p.name == name)
    }

    /// Insert or replace a part. New parts are appended at the end.
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        let name = normalize_part_name(name);
        match self.parts.iter_mut().find(|p| p.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(Part {
                name: name.to_string(),
                data,
            }),
        }
    }

    /// Name of the main document part.
    ///
    /// Resolved through the package relationships; falls back to
    /// `word/document.xml` when the relationships part is absent or does not
    /// carry an officeDocument relationship.
    pub fn main_document_name(&self) -> Result<String> {
        let Some(rels) = self.part(PACKAGE_RELS) else {
            return Ok(DEFAULT_DOCUMENT_PART.to_string());
        };

        let content = String::from_utf8_lossy(&rels.data);
        let rels = xml::parse(&content)?;
        let target = rels
            .root
            .children_named("Relationship")
            .find(|rel| {
                rel.get_attribute("Type")
                    .is_some_and(|t| t.ends_with(OFFICE_DOCUMENT_REL_SUFFIX))
            })
            .and_then(|rel| rel.get_attribute("Target"));

        Ok(target
            .map(|t| normalize_part_name(t).to_string())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_PART.to_string()))
    }

    /// Write every part as a deflated zip entry.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        for part in &self.parts {
            let options: FileOptions<'_, ()> =
                FileOptions::default().compression_method(CompressionMethod::Deflated);
            zip.start_file(part.name.as_str(), options)?;
            zip.write_all(&part.data)?;
        }
        zip.finish()?;
        Ok(())
    }

    /// Write the package to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        debug!(path = %path.display(), parts = self.parts.len(), "Wrote package");
        Ok(())
    }

    /// Decode a part as UTF-8 text.
    pub fn part_text(&self, name: &str) -> Result<String> {
        let part = self
            .part(name)
            .ok_or_else(|| DocxError::MissingPart(name.to_string()))?;
        String::from_utf8(part.data.clone())
            .map_err(|e| DocxError::InvalidStructure(format!("part '{}' is not UTF-8: {}", name, e)))
    }
}

fn normalize_part_name(name: &str) -> &str {
    name.strip_prefix('/').unwrap_or(name)
}
