//! WinAnsi (Windows-1252) text encoding for the base-14 fonts.
//!
//! The fonts are declared with `/WinAnsiEncoding`, so this is the full set of characters
//! the document can show: printable ASCII, Latin-1 (0xA0..=0xFF) and the 0x80..=0x9F
//! typographic block. Anything else is replaced with `?` and counted. The layout measures
//! every character by the same byte, see `font_metrics::win_ansi_code`.

use crate::layout::font_metrics::{win_ansi_code, REPLACEMENT};

/// Text encoded for a content stream, plus how many characters had to be replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub replaced: usize,
}

pub fn encode_win_ansi(text: &str) -> Encoded {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0;
    for c in text.chars() {
        match win_ansi_code(c) {
            Some(b) => bytes.push(b),
            None => {
                bytes.push(REPLACEMENT);
                replaced += 1;
            }
        }
    }
    Encoded { bytes, replaced }
}

/// Number of characters in `text` that WinAnsi cannot represent.
pub fn count_unencodable(text: &str) -> usize {
    text.chars()
        .filter(|&c| c != '\n' && win_ansi_code(c).is_none())
        .count()
}
