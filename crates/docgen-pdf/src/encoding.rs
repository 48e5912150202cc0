//! WinAnsiEncoding for the built-in Type 1 fonts.

/// Byte for `ch` in WinAnsiEncoding, if the encoding has it.
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => u8::try_from(code).ok(),
        _ => {
            let byte = match ch {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '†' => 0x86,
                '‡' => 0x87,
                'ˆ' => 0x88,
                '‰' => 0x89,
                'Š' => 0x8A,
                '‹' => 0x8B,
                'Œ' => 0x8C,
                'Ž' => 0x8E,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '˜' => 0x98,
                '™' => 0x99,
                'š' => 0x9A,
                '›' => 0x9B,
                'œ' => 0x9C,
                'ž' => 0x9E,
                'Ÿ' => 0x9F,
                _ => return None,
            };
            Some(byte)
        }
    }
}

/// Map `text` onto the characters the fonts can show. Whitespace becomes a
/// plain space, other control characters are dropped and anything outside
/// WinAnsiEncoding becomes `?`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter_map(|ch| {
            if ch.is_whitespace() {
                Some(' ')
            } else if ch.is_control() {
                None
            } else if win_ansi_byte(ch).is_some() {
                Some(ch)
            } else {
                Some('?')
            }
        })
        .collect()
}

/// Encode normalized text for a content stream.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|ch| !ch.is_control())
        .map(|ch| win_ansi_byte(ch).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_and_latin1() {
        assert_eq!(encode("Café 5€"), vec![b'C', b'a', b'f', 0xE9, b' ', b'5', 0x80]);
    }

    #[test]
    fn test_unsupported_becomes_question_mark() {
        assert_eq!(normalize("Zürich → Łódź"), "Zürich ? ?ód?");
        assert_eq!(encode("→"), b"?".to_vec());
    }

    #[test]
    fn test_controls_dropped() {
        assert_eq!(normalize("a\tb\u{7}c"), "a bc");
    }

    #[test]
    fn test_typographic_quotes() {
        assert_eq!(encode("“x”"), vec![0x93, b'x', 0x94]);
    }
}
