//! Literal placeholder substitution.
//!
//! Placeholders are plain substrings (`{{client}}`, `{{ client }}`); there is
//! no expression language here. Keys are applied in insertion order and each
//! key re-scans the paragraph text produced by the keys before it, so a value
//! that itself contains a later placeholder gets substituted again.

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{Document, ParagraphMut, RunContent, set_text_node};

/// Ordered mapping from literal pattern to replacement text.
pub type Replacements = LinkedHashMap<String, String>;

/// How a paragraph that received a substitution is rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubstitutionMode {
    /// Collapse the paragraph into one unformatted run holding the new text.
    #[default]
    Paragraph,

    /// Edit the text nodes in place so run formatting survives.
    PreserveRuns,
}

/// Apply `replacements` to every paragraph of `document`, body paragraphs
/// first and then table cell paragraphs. Returns the number of paragraphs
/// that changed.
pub fn substitute(
    document: &mut Document,
    replacements: &Replacements,
    mode: SubstitutionMode,
) -> usize {
    let mut changed = 0;
    for mut paragraph in document.paragraphs_mut() {
        let hit = match mode {
            SubstitutionMode::Paragraph => substitute_paragraph(&mut paragraph, replacements),
            SubstitutionMode::PreserveRuns => substitute_in_runs(&mut paragraph, replacements),
        };
        if hit {
            changed += 1;
        }
    }

    debug!(
        patterns = replacements.len(),
        paragraphs = changed,
        ?mode,
        "Substituted placeholders"
    );
    changed
}

fn substitute_paragraph(paragraph: &mut ParagraphMut<'_>, replacements: &Replacements) -> bool {
    let mut text = paragraph.text();
    let mut hit = false;

    for (pattern, value) in replacements {
        if pattern.is_empty() || !text.contains(pattern.as_str()) {
            continue;
        }
        text = text.replace(pattern.as_str(), value);
        hit = true;
    }

    if hit {
        paragraph.set_text(&text);
    }
    hit
}

fn substitute_in_runs(paragraph: &mut ParagraphMut<'_>, replacements: &Replacements) -> bool {
    let mut content = paragraph.run_content_mut();
    let mut segments = Segments::new(
        content
            .iter()
            .map(|item| match item {
                RunContent::Text(t) => (t.text(), true),
                RunContent::Fixed(text) => (text.to_string(), false),
            })
            .collect(),
    );

    for (pattern, value) in replacements {
        if pattern.is_empty() {
            continue;
        }
        let mut from = 0;
        while let Some(start) = segments.find(pattern, from) {
            segments.splice(start, pattern.len(), value);
            from = start + value.len();
        }
    }

    let mut hit = false;
    for (item, (text, dirty)) in content.iter_mut().zip(segments.into_parts()) {
        if let (RunContent::Text(node), true) = (item, dirty) {
            set_text_node(node, &text);
            hit = true;
        }
    }
    hit
}

/// Paragraph text split at run content boundaries and searched as one
/// string. Only `w:t` segments are editable; a match that overlaps the text
/// of a tab or break is not replaced.
struct Segments {
    texts: Vec<String>,
    editable: Vec<bool>,
    dirty: Vec<bool>,
}

impl Segments {
    fn new(parts: Vec<(String, bool)>) -> Self {
        let dirty = vec![false; parts.len()];
        let (texts, editable) = parts.into_iter().unzip();
        Self {
            texts,
            editable,
            dirty,
        }
    }

    /// Byte offset of the next replaceable match at or after `from` in the
    /// joined text.
    fn find(&self, pattern: &str, from: usize) -> Option<usize> {
        let joined = self.texts.concat();
        let mut from = from;
        loop {
            let start = from + joined.get(from..)?.find(pattern)?;
            if !self.overlaps_fixed(start, start + pattern.len()) {
                return Some(start);
            }
            from = start + joined[start..].chars().next().map_or(1, char::len_utf8);
        }
    }

    fn overlaps_fixed(&self, start: usize, end: usize) -> bool {
        let mut offset = 0;
        for (text, editable) in self.texts.iter().zip(&self.editable) {
            let segment_end = offset + text.len();
            if !editable && !text.is_empty() && offset < end && start < segment_end {
                return true;
            }
            offset = segment_end;
        }
        false
    }

    /// Replace `len` bytes starting at joined offset `start` with `value`.
    ///
    /// The value lands in the segment holding `start`; whatever remains of
    /// the match is removed from the front of the following segments.
    fn splice(&mut self, start: usize, len: usize, value: &str) {
        let mut offset = 0;
        let mut remaining = len;
        let mut placed = false;

        let segments = self
            .texts
            .iter_mut()
            .zip(self.dirty.iter_mut())
            .zip(self.editable.iter().copied());
        for ((text, dirty), editable) in segments {
            let end = offset + text.len();
            if !editable {
                offset = end;
                continue;
            }
            if !placed {
                if start >= end {
                    offset = end;
                    continue;
                }
                let local = start - offset;
                let take = remaining.min(text.len() - local);
                text.replace_range(local..local + take, value);
                remaining -= take;
                placed = true;
                *dirty = true;
            } else if remaining > 0 {
                let take = remaining.min(text.len());
                text.replace_range(..take, "");
                remaining -= take;
                *dirty = true;
            }
            if placed && remaining == 0 {
                break;
            }
            offset = end;
        }
    }

    fn into_parts(self) -> impl Iterator<Item = (String, bool)> {
        self.texts.into_iter().zip(self.dirty)
    }
}
