/*
 * package_roundtrip.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for saving, reopening and substituting DOCX packages.
 */

use docgen_docx::{Document, Package, Replacements, SubstitutionMode, substitute};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const STYLES_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="Heading1"/></w:styles>"#;

fn placeholders(pairs: &[(&str, &str)]) -> Replacements {
    let mut replacements = Replacements::new();
    for (key, value) in pairs {
        replacements.insert(format!("{{{{{}}}}}", key), value.to_string());
        replacements.insert(format!("{{{{ {} }}}}", key), value.to_string());
    }
    replacements
}

/// Write a template with a styles part the document model never reads.
fn write_template(dir: &TempDir) -> std::path::PathBuf {
    let mut doc = Document::new();
    doc.add_paragraph("Offer for {{client}}").unwrap();
    doc.add_paragraph("").unwrap();
    doc.add_paragraph("Total: {{ total }} EUR").unwrap();
    doc.add_table(&[
        vec!["Client".to_string(), "Total".to_string()],
        vec!["{{client}}".to_string(), "{{total}}".to_string()],
    ])
    .unwrap();

    let staging = dir.path().join("staging.docx");
    doc.save(&staging).unwrap();

    let mut package = Package::open(&staging).unwrap();
    package.set_part("word/styles.xml", STYLES_XML.to_vec());
    let template = dir.path().join("template.docx");
    package.save(&template).unwrap();
    template
}

#[test]
fn test_new_document_reopens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.docx");

    let mut doc = Document::new();
    doc.add_paragraph("Hello\tworld").unwrap();
    doc.save(&path).unwrap();

    let reopened = Document::open(&path).unwrap();
    let texts: Vec<String> = reopened.paragraphs().map(|p| p.text()).collect();
    assert_eq!(texts, vec!["Hello\tworld".to_string()]);
}

#[test]
fn test_substitute_and_reopen() {
    let dir = TempDir::new().unwrap();
    let template = write_template(&dir);

    let mut doc = Document::open(&template).unwrap();
    let changed = substitute(
        &mut doc,
        &placeholders(&[("client", "ACME"), ("total", "1200")]),
        SubstitutionMode::Paragraph,
    );
    assert_eq!(changed, 4);

    let output = dir.path().join("offer.docx");
    doc.save(&output).unwrap();

    let reopened = Document::open(&output).unwrap();
    let texts: Vec<String> = reopened.paragraphs().map(|p| p.text()).collect();
    assert_eq!(texts, vec!["Offer for ACME", "", "Total: 1200 EUR"]);

    let table = reopened.tables().next().unwrap();
    assert_eq!(table.cell(1, 0).unwrap().text(), "ACME");
    assert_eq!(table.cell(1, 1).unwrap().text(), "1200");
}

#[test]
fn test_uninterpreted_parts_survive() {
    let dir = TempDir::new().unwrap();
    let template = write_template(&dir);

    let mut doc = Document::open(&template).unwrap();
    let output = dir.path().join("copy.docx");
    doc.save(&output).unwrap();

    let package = Package::open(&output).unwrap();
    assert_eq!(package.part("word/styles.xml").unwrap().data, STYLES_XML);

    let names: Vec<&str> = package.parts().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
        ]
    );
}

#[test]
fn test_substitution_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let template = write_template(&dir);
    let replacements = placeholders(&[("client", "ACME"), ("total", "1200")]);

    let mut doc = Document::open(&template).unwrap();
    substitute(&mut doc, &replacements, SubstitutionMode::Paragraph);
    let once = doc.text();

    let changed = substitute(&mut doc, &replacements, SubstitutionMode::Paragraph);
    assert_eq!(changed, 0);
    assert_eq!(doc.text(), once);
}

#[test]
fn test_no_placeholder_remains() {
    let dir = TempDir::new().unwrap();
    let template = write_template(&dir);

    for mode in [SubstitutionMode::Paragraph, SubstitutionMode::PreserveRuns] {
        let mut doc = Document::open(&template).unwrap();
        substitute(
            &mut doc,
            &placeholders(&[("client", "ACME"), ("total", "1200")]),
            mode,
        );

        let mut all_text: Vec<String> = doc.paragraphs().map(|p| p.text()).collect();
        for table in doc.tables() {
            for row in table.rows() {
                all_text.extend(row.cells().map(|c| c.text()));
            }
        }
        for text in &all_text {
            assert!(!text.contains("{{"), "placeholder left in {:?} ({:?})", text, mode);
        }
    }
}

#[test]
fn test_open_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Document::open(dir.path().join("absent.docx"));
    assert!(matches!(result, Err(docgen_docx::DocxError::Io(_))));
}
