//! Story elements.

use crate::style::ParagraphStyle;

/// A block of text laid out with one style.
///
/// The text is taken literally; runs of whitespace collapse to single
/// spaces when the paragraph is wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: ParagraphStyle,
}

/// One element of a story.
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph(Paragraph),
    /// Fixed vertical gap, in points.
    Spacer { height: f32 },
}

impl Flowable {
    pub fn paragraph(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Flowable::Paragraph(Paragraph {
            text: text.into(),
            style,
        })
    }

    pub fn spacer(height: f32) -> Self {
        Flowable::Spacer { height }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Flowable::Paragraph(p) => Some(p),
            Flowable::Spacer { .. } => None,
        }
    }
}
