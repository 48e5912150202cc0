/*
 * style.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Paragraph styles and the sample style sheet.

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .ok()
                .map(|v| f32::from(v) / 255.0)
        };
        Some(Color {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

/// Horizontal alignment of the lines of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    /// Laid out as [`Alignment::Left`].
    Justify,
}

/// The built-in Type 1 fonts a story can use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Font {
    #[default]
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub const ALL: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

    /// PostScript name used as the font's `/BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name of the font in every page's resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }
}

/// Typographic settings for one kind of paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub name: String,
    pub font: Font,
    pub font_size: f32,
    /// Distance between consecutive baselines.
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub alignment: Alignment,
    pub text_color: Color,
}

impl ParagraphStyle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            font: Font::Helvetica,
            font_size: 10.0,
            leading: 12.0,
            space_before: 0.0,
            space_after: 0.0,
            alignment: Alignment::Left,
            text_color: Color::BLACK,
        }
    }

    /// Copy every setting of this style under a new name.
    pub fn derive(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub fn space_before(mut self, space: f32) -> Self {
        self.space_before = space;
        self
    }

    pub fn space_after(mut self, space: f32) -> Self {
        self.space_after = space;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }
}

/// The conventional sample styles.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub normal: ParagraphStyle,
    pub heading1: ParagraphStyle,
    pub heading2: ParagraphStyle,
}

impl StyleSheet {
    pub fn sample() -> Self {
        let normal = ParagraphStyle::new("Normal");
        let heading1 = normal
            .derive("Heading1")
            .font(Font::HelveticaBold)
            .font_size(18.0)
            .leading(22.0)
            .space_after(6.0);
        let heading2 = normal
            .derive("Heading2")
            .font(Font::HelveticaBold)
            .font_size(14.0)
            .leading(18.0)
            .space_before(12.0)
            .space_after(6.0);

        Self {
            normal,
            heading1,
            heading2,
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::sample()
    }
}
