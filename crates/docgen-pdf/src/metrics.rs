//! Glyph widths of the standard Helvetica faces.
//!
//! Widths are in 1/1000 of the font size, taken from the Adobe core font
//! metrics for the printable ASCII range. Characters outside that range are
//! measured with the width of the digit glyphs.

use crate::style::Font;

const DEFAULT_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,      // 'p'..'~'
];

/// Advance width of `ch` in font units.
pub fn char_width(font: Font, ch: char) -> u16 {
    let table = match font {
        Font::Helvetica => &HELVETICA,
        Font::HelveticaBold => &HELVETICA_BOLD,
    };
    (ch as usize)
        .checked_sub(0x20)
        .and_then(|index| table.get(index))
        .copied()
        .unwrap_or(DEFAULT_WIDTH)
}

/// Width of `text` in points at `size`.
pub fn string_width(font: Font, text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(|ch| u32::from(char_width(font, ch))).sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(char_width(Font::Helvetica, ' '), 278);
        assert_eq!(char_width(Font::Helvetica, 'W'), 944);
        assert_eq!(char_width(Font::Helvetica, 'i'), 222);
        assert_eq!(char_width(Font::HelveticaBold, 'i'), 278);
        assert_eq!(char_width(Font::HelveticaBold, '~'), 584);
    }

    #[test]
    fn test_out_of_table_default() {
        assert_eq!(char_width(Font::Helvetica, 'é'), DEFAULT_WIDTH);
        assert_eq!(char_width(Font::Helvetica, '\u{1}'), DEFAULT_WIDTH);
    }

    #[test]
    fn test_string_width() {
        // "Hi" = 722 + 222 units
        let width = string_width(Font::Helvetica, "Hi", 10.0);
        assert!((width - 9.44).abs() < 1e-4);
    }
}
