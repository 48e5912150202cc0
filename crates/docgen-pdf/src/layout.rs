/*
 * layout.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Line breaking and pagination.
//!
//! The story flows through a single frame per page. Paragraphs are split
//! between pages at line boundaries. Vertical spacing follows the usual
//! flowable rules:
//!
//! - space before a paragraph is dropped at the top of a frame and otherwise
//!   reduced by the space after the preceding paragraph
//! - a spacer that does not fit on the current page ends the page and is
//!   discarded

use tracing::trace;

use crate::encoding;
use crate::flowable::{Flowable, Paragraph};
use crate::geometry::{Margins, PageSize};
use crate::metrics::string_width;
use crate::style::{Alignment, Color, Font};

/// The rectangle text is laid out in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Left edge.
    pub x: f32,
    /// Upper edge, measured from the bottom of the page.
    pub top: f32,
    pub width: f32,
    /// Lower edge, measured from the bottom of the page.
    pub bottom: f32,
}

impl Frame {
    pub fn new(page_size: PageSize, margins: &Margins) -> Self {
        Self {
            x: margins.left,
            top: page_size.height() - margins.top,
            width: page_size.width() - margins.left - margins.right,
            bottom: margins.bottom,
        }
    }
}

/// A line of text at its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub font: Font,
    pub font_size: f32,
    pub color: Color,
}

/// Lines placed on one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Break `text` into lines no wider than `width`.
///
/// Whitespace runs collapse to one space. A word wider than the frame is
/// split between characters.
pub fn wrap(text: &str, font: Font, size: f32, width: f32) -> Vec<String> {
    let text = encoding::normalize(text);
    let fits = |candidate: &str| string_width(font, candidate, size) <= width;

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if fits(word) {
            current = word.to_string();
            continue;
        }

        for ch in word.chars() {
            current.push(ch);
            if current.chars().count() > 1 && !fits(&current) {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out a story, returning at least one page.
pub fn layout(story: &[Flowable], frame: &Frame) -> Vec<Page> {
    let mut state = LayoutState::new(frame);
    for flowable in story {
        match flowable {
            Flowable::Paragraph(paragraph) => state.add_paragraph(paragraph),
            Flowable::Spacer { height } => state.add_spacer(*height),
        }
    }
    state.finish()
}

struct LayoutState<'a> {
    frame: &'a Frame,
    pages: Vec<Page>,
    current: Page,
    y: f32,
    at_top: bool,
    prev_space_after: f32,
}

impl<'a> LayoutState<'a> {
    fn new(frame: &'a Frame) -> Self {
        Self {
            frame,
            pages: Vec::new(),
            current: Page::default(),
            y: frame.top,
            at_top: true,
            prev_space_after: 0.0,
        }
    }

    fn break_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.y = self.frame.top;
        self.at_top = true;
        self.prev_space_after = 0.0;
        trace!(page = self.pages.len() + 1, "Started page");
    }

    fn add_paragraph(&mut self, paragraph: &Paragraph) {
        let style = &paragraph.style;
        if !self.at_top {
            self.y -= (style.space_before - self.prev_space_after).max(0.0);
        }

        for text in wrap(&paragraph.text, style.font, style.font_size, self.frame.width) {
            if !self.at_top && self.y - style.leading < self.frame.bottom {
                self.break_page();
            }

            let line_width = string_width(style.font, &text, style.font_size);
            let x = match style.alignment {
                Alignment::Left | Alignment::Justify => self.frame.x,
                Alignment::Center => self.frame.x + (self.frame.width - line_width) / 2.0,
                Alignment::Right => self.frame.x + self.frame.width - line_width,
            };

            self.current.lines.push(PlacedLine {
                text,
                x,
                baseline: self.y - style.font_size,
                font: style.font,
                font_size: style.font_size,
                color: style.text_color,
            });
            self.y -= style.leading;
            self.at_top = false;
        }

        self.y -= style.space_after;
        self.prev_space_after = style.space_after;
    }

    fn add_spacer(&mut self, height: f32) {
        if self.y - height < self.frame.bottom {
            if !self.at_top {
                self.break_page();
            }
            return;
        }
        self.y -= height;
        self.at_top = false;
        self.prev_space_after = 0.0;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.lines.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ParagraphStyle, StyleSheet};
    use pretty_assertions::assert_eq;

    fn a4_frame() -> Frame {
        Frame::new(PageSize::A4, &Margins::default())
    }

    #[test]
    fn test_frame_from_margins() {
        let frame = a4_frame();
        assert_eq!(frame.x, 72.0);
        assert_eq!(frame.bottom, 18.0);
        assert!((frame.width - 451.2756).abs() < 1e-3);
        assert!((frame.top - 769.8898).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        let lines = wrap("  one \t two   three ", Font::Helvetica, 10.0, 500.0);
        assert_eq!(lines, vec!["one two three"]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(10);
        let lines = wrap(&text, Font::Helvetica, 10.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(string_width(Font::Helvetica, line, 10.0) <= 200.0, "{line}");
        }
        assert_eq!(lines.join(" "), text.trim());
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let lines = wrap(&"W".repeat(30), Font::Helvetica, 10.0, 50.0);
        // 'W' is 9.44pt at 10pt, so five fit per line
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.len() == 5));
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap("   ", Font::Helvetica, 10.0, 100.0).is_empty());
    }

    #[test]
    fn test_empty_story_has_one_page() {
        let pages = layout(&[], &a4_frame());
        assert_eq!(pages, vec![Page::default()]);
    }

    #[test]
    fn test_first_line_position() {
        let sheet = StyleSheet::sample();
        let frame = a4_frame();
        let pages = layout(&[Flowable::paragraph("Hello", sheet.normal.clone())], &frame);

        let line = &pages[0].lines[0];
        assert_eq!(line.x, 72.0);
        assert!((line.baseline - (frame.top - 10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_space_before_dropped_at_top() {
        let sheet = StyleSheet::sample();
        let frame = a4_frame();
        let story = vec![
            Flowable::paragraph("Section", sheet.heading2.clone()),
            Flowable::paragraph("Next", sheet.heading2.clone()),
        ];
        let pages = layout(&story, &frame);
        let lines = &pages[0].lines;

        assert!((lines[0].baseline - (frame.top - 14.0)).abs() < 1e-3);
        // leading 18, space after 6, space before 12 reduced by 6
        let expected = frame.top - 18.0 - 6.0 - 6.0 - 14.0;
        assert!((lines[1].baseline - expected).abs() < 1e-3);
    }

    #[test]
    fn test_centered_line() {
        let style = ParagraphStyle::new("Centered").alignment(Alignment::Center);
        let frame = a4_frame();
        let pages = layout(&[Flowable::paragraph("Hi", style)], &frame);

        let width = string_width(Font::Helvetica, "Hi", 10.0);
        let expected = frame.x + (frame.width - width) / 2.0;
        assert!((pages[0].lines[0].x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_paginates_and_stays_in_frame() {
        let sheet = StyleSheet::sample();
        let frame = a4_frame();
        let story: Vec<Flowable> = (0..120)
            .flat_map(|i| {
                [
                    Flowable::paragraph(format!("Paragraph {i}"), sheet.normal.clone()),
                    Flowable::spacer(12.0),
                ]
            })
            .collect();

        let pages = layout(&story, &frame);
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(!page.lines.is_empty());
            for line in &page.lines {
                assert!(line.baseline >= frame.bottom);
                assert!(line.baseline <= frame.top);
            }
        }
        let total: usize = pages.iter().map(|p| p.lines.len()).sum();
        assert_eq!(total, 120);
    }

    #[test]
    fn test_trailing_spacer_adds_no_page() {
        let sheet = StyleSheet::sample();
        let frame = a4_frame();
        let story = vec![
            Flowable::paragraph("Only line", sheet.normal.clone()),
            Flowable::spacer(10_000.0),
        ];
        let pages = layout(&story, &frame);
        assert_eq!(pages.len(), 1);
    }
}
