/*
 * build.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for writing stories to disk.
 */

use docgen_pdf::{Alignment, Color, DocTemplate, Flowable, Margins, PageSize, StyleSheet};
use tempfile::TempDir;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    occurrences(haystack, needle) > 0
}

fn occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn test_build_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offer.pdf");
    let sheet = StyleSheet::sample();
    let title = sheet
        .heading1
        .derive("Title")
        .font_size(24.0)
        .space_after(30.0)
        .alignment(Alignment::Center)
        .text_color(Color::from_hex("#1a1a1a").unwrap());

    let story = vec![
        Flowable::paragraph("Offer", title),
        Flowable::spacer(12.0),
        Flowable::paragraph("Body text", sheet.normal.clone()),
        Flowable::spacer(12.0),
    ];
    DocTemplate::new(&path).build(&story).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"(Offer) Tj"));
    assert!(contains(&bytes, b"(Body text) Tj"));
    assert_eq!(occurrences(&bytes, b"/MediaBox"), 1);
}

#[test]
fn test_long_story_spans_pages() {
    let sheet = StyleSheet::sample();
    let paragraph = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(20);
    let story: Vec<Flowable> = (0..40)
        .flat_map(|_| {
            [
                Flowable::paragraph(paragraph.clone(), sheet.normal.clone()),
                Flowable::spacer(12.0),
            ]
        })
        .collect();

    let template = DocTemplate::new("unused.pdf")
        .page_size(PageSize::Letter)
        .margins(Margins::default());
    let bytes = template.render(&story);

    assert!(occurrences(&bytes, b"/MediaBox [0 0 612 792]") > 1);
}

#[test]
fn test_build_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.pdf");
    let result = DocTemplate::new(&path).build(&[]);
    assert!(matches!(result, Err(docgen_pdf::PdfError::Io(_))));
}
