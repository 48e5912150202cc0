//! Mapping rendered text and data onto output documents.

use docgen_docx::Document;
use docgen_pdf::{Alignment, Color, Flowable, ParagraphStyle, StyleSheet};
use tracing::debug;

use crate::data::{DataMap, value_to_string};
use crate::error::Result;
use crate::render::TemplateRenderer;

/// Build a fresh document with one paragraph per line of `rendered`.
///
/// Lines are added verbatim; whitespace-only lines become empty paragraphs.
/// Markdown-style markers have no special meaning here.
pub fn emit_docx(rendered: &str) -> Result<Document> {
    let mut document = Document::new();
    let mut lines = 0;
    for line in rendered.split('\n') {
        if line.trim().is_empty() {
            document.add_paragraph("")?;
        } else {
            document.add_paragraph(line)?;
        }
        lines += 1;
    }
    debug!(paragraphs = lines, "Emitted DOCX paragraphs");
    Ok(document)
}

/// Styles used for PDF stories.
#[derive(Debug, Clone)]
pub struct StoryStyles {
    pub title: ParagraphStyle,
    pub heading2: ParagraphStyle,
    pub normal: ParagraphStyle,
    pub spacer_height: f32,
}

impl StoryStyles {
    pub fn new(spacer_height: f32) -> Self {
        let sheet = StyleSheet::sample();
        let title = sheet
            .heading1
            .derive("Title")
            .font_size(24.0)
            .text_color(Color::from_hex("#1a1a1a").unwrap_or(Color::BLACK))
            .space_after(30.0)
            .alignment(Alignment::Center);

        Self {
            title,
            heading2: sheet.heading2,
            normal: sheet.normal,
            spacer_height,
        }
    }
}

impl Default for StoryStyles {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Build the PDF story.
///
/// With non-empty template text, the template is rendered and every
/// non-blank line becomes a paragraph: `# ` lines use the title style,
/// `## ` lines use Heading2 and everything else is Normal. Without a
/// template (or with an empty one) only the `title` and `content` keys of
/// `data` are used. Every paragraph is followed by a spacer.
pub fn build_story(
    data: &DataMap,
    template: Option<&str>,
    renderer: &TemplateRenderer,
    styles: &StoryStyles,
) -> Result<Vec<Flowable>> {
    let mut story = Vec::new();
    let mut push = |text: &str, style: &ParagraphStyle| {
        story.push(Flowable::paragraph(text, style.clone()));
        story.push(Flowable::spacer(styles.spacer_height));
    };

    match template.filter(|t| !t.is_empty()) {
        Some(template) => {
            let rendered = renderer.render(template, data)?;
            for line in rendered.split('\n') {
                if line.trim().is_empty() {
                    continue;
                }
                if let Some(title) = line.strip_prefix("# ") {
                    push(title, &styles.title);
                } else if let Some(heading) = line.strip_prefix("## ") {
                    push(heading, &styles.heading2);
                } else {
                    push(line, &styles.normal);
                }
            }
        }
        None => {
            if let Some(title) = data.get("title") {
                push(&value_to_string(title), &styles.title);
            }
            if let Some(content) = data.get("content") {
                push(&value_to_string(content), &styles.normal);
            }
        }
    }

    debug!(flowables = story.len(), "Built PDF story");
    Ok(story)
}
