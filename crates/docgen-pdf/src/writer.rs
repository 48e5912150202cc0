//! Serialization of laid-out pages with pdf-writer.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::encoding;
use crate::geometry::PageSize;
use crate::layout::Page;
use crate::style::Font;

pub(crate) const PRODUCER: &str = concat!("docgen-pdf ", env!("CARGO_PKG_VERSION"));

/// Hands out object ids in increasing order.
struct RefAllocator {
    next: i32,
}

impl RefAllocator {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn bump(&mut self) -> Ref {
        let id = Ref::new(self.next);
        self.next += 1;
        id
    }
}

/// Write `pages` as a complete PDF file.
pub(crate) fn write_pdf(pages: &[Page], page_size: PageSize) -> Vec<u8> {
    let mut refs = RefAllocator::new();
    let catalog_id = refs.bump();
    let page_tree_id = refs.bump();
    let info_id = refs.bump();
    let fonts: Vec<(Font, Ref)> = Font::ALL.iter().map(|&font| (font, refs.bump())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.document_info(info_id).producer(TextStr(PRODUCER));

    for &(font, id) in &fonts {
        pdf.type1_font(id)
            .base_font(Name(font.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let mut page_ids = Vec::with_capacity(pages.len());
    for page in pages {
        let page_id = refs.bump();
        let content_id = refs.bump();
        page_ids.push(page_id);

        pdf.stream(content_id, &page_content(page));

        let mut writer = pdf.page(page_id);
        writer
            .media_box(Rect::new(0.0, 0.0, page_size.width(), page_size.height()))
            .parent(page_tree_id)
            .contents(content_id);

        let mut resources = writer.resources();
        let mut font_dict = resources.fonts();
        for &(font, id) in &fonts {
            font_dict.pair(Name(font.resource_name().as_bytes()), id);
        }
        font_dict.finish();
        resources.finish();
        writer.finish();
    }

    let count = page_ids.len() as i32;
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(count);

    pdf.finish()
}

fn page_content(page: &Page) -> Vec<u8> {
    let mut content = Content::new();
    for line in &page.lines {
        let bytes = encoding::encode(&line.text);
        content.begin_text();
        content.set_font(Name(line.font.resource_name().as_bytes()), line.font_size);
        content.set_fill_rgb(line.color.r, line.color.g, line.color.b);
        content.next_line(line.x, line.baseline);
        content.show(Str(&bytes));
        content.end_text();
    }
    content.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PlacedLine;
    use crate::style::Color;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_empty_document_is_valid() {
        let bytes = write_pdf(&[Page::default()], PageSize::A4);
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(contains(&bytes, b"/Count 1"));
        assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
        assert!(contains(&bytes, b"%%EOF"));
    }

    #[test]
    fn test_line_is_shown() {
        let page = Page {
            lines: vec![PlacedLine {
                text: "Offer".to_string(),
                x: 72.0,
                baseline: 700.0,
                font: Font::HelveticaBold,
                font_size: 24.0,
                color: Color::BLACK,
            }],
        };
        let bytes = write_pdf(&[page.clone(), page], PageSize::Letter);
        assert!(contains(&bytes, b"(Offer) Tj"));
        assert!(contains(&bytes, b"/F2 24 Tf"));
        assert!(contains(&bytes, b"/Count 2"));
        assert!(contains(&bytes, b"/MediaBox [0 0 612 792]"));
    }

    #[test]
    fn test_producer_recorded() {
        let bytes = write_pdf(&[Page::default()], PageSize::A4);
        assert!(contains(&bytes, b"/Producer (docgen-pdf"));
    }
}
