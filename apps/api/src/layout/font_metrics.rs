//! Static font-metric tables for the PDF base-14 Helvetica family.
//!
//! Widths come from the Adobe AFM files and are stored in em units (AFM value / 1000),
//! so `width_pt = em * font_size_pt`. Both tables cover the whole WinAnsi code page the
//! fonts are declared with, so measurement and rendering always agree on the glyph.

use serde::{Deserialize, Serialize};

/// Millimetres to PDF points.
pub const MM: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The two base-14 fonts the résumé layout uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseFont {
    Helvetica,
    HelveticaBold,
}

impl BaseFont {
    /// PostScript name written into the PDF font dictionary.
    pub fn postscript_name(self) -> &'static str {
        match self {
            BaseFont::Helvetica => "Helvetica",
            BaseFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name the content streams refer to.
    pub fn resource_name(self) -> &'static str {
        match self {
            BaseFont::Helvetica => "F1",
            BaseFont::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Physical page geometry, in PDF points.
///
/// The printable area is the page minus all four margins. The bottom margin doubles as the
/// automatic page-break threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_left_pt: f32,
    pub margin_right_pt: f32,
    pub margin_top_pt: f32,
    pub margin_bottom_pt: f32,
}

impl PageConfig {
    pub fn printable_width(&self) -> f32 {
        self.width_pt - self.margin_left_pt - self.margin_right_pt
    }

    pub fn printable_height(&self) -> f32 {
        self.height_pt - self.margin_top_pt - self.margin_bottom_pt
    }
}

/// A4 portrait, 10 mm side and top margins, 15 mm bottom break margin.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        width_pt: 595.28,
        height_pt: 841.89,
        margin_left_pt: 10.0 * MM,
        margin_right_pt: 10.0 * MM,
        margin_top_pt: 10.0 * MM,
        margin_bottom_pt: 15.0 * MM,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi code page
// ────────────────────────────────────────────────────────────────────────────

/// Byte the fonts' `/WinAnsiEncoding` uses for `c`, or `None` if the code page has no glyph.
///
/// Tab maps to space. Printable ASCII and Latin-1 (0xA0..=0xFF) map to themselves; the
/// 0x80..=0x9F block holds the typographic punctuation.
pub fn win_ansi_code(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x09 => Some(b' '),
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

/// Byte printed in place of a character the code page cannot show.
pub const REPLACEMENT: u8 = b'?';

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

const FIRST_CODE: u8 = 0x20;
const TABLE_LEN: usize = 0x100 - FIRST_CODE as usize;

/// Static glyph-width table for one font, indexed by WinAnsi byte (0x20..=0xFF).
///
/// A character is measured by the glyph the renderer will actually emit: its WinAnsi byte,
/// or `?` when it has none.
pub struct FontMetricTable {
    widths: [f32; TABLE_LEN],
    pub space_width: f32,
}

impl FontMetricTable {
    fn code_width(&self, code: u8) -> f32 {
        self.widths[(code.max(FIRST_CODE) - FIRST_CODE) as usize]
    }

    /// Width of a single character in em units.
    pub fn char_width(&self, c: char) -> f32 {
        self.code_width(win_ansi_code(c).unwrap_or(REPLACEMENT))
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Measures the rendered width of a string in points at `size_pt`.
    pub fn measure_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }
}

/// Returns the static metric table for a font.
pub fn get_metrics(font: BaseFont) -> &'static FontMetricTable {
    match font {
        BaseFont::Helvetica => &HELVETICA_TABLE,
        BaseFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (AFM widths / 1000, WinAnsi 0x20..=0xFF)
// ────────────────────────────────────────────────────────────────────────────
// Unassigned slots 0x81, 0x8D, 0x8F, 0x90, 0x9D carry the bullet width; nothing encodes to them.

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // 0x20  sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0x30  0-9, :      ;      <      =      >      ?
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.584, 0.584, 0.584, 0.556,
        // 0x40  @      A      B      C      D      E      F      G      H      I      J      K      L      M      N      O
        1.015, 0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833, 0.722, 0.778,
        // 0x50  P      Q      R      S      T      U      V      W      X      Y      Z      [      \      ]      ^      _
        0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611, 0.278, 0.278, 0.278, 0.469, 0.556,
        // 0x60  `      a      b      c      d      e      f      g      h      i      j      k      l      m      n      o
        0.333, 0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833, 0.556, 0.556,
        // 0x70  p      q      r      s      t      u      v      w      x      y      z      {      |      }      ~      DEL
        0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500, 0.334, 0.260, 0.334, 0.584, 0.350,
        // 0x80  €      -      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      -      Ž      -
        0.556, 0.350, 0.222, 0.556, 0.333, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.350, 0.611, 0.350,
        // 0x90  -      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      -      ž      Ÿ
        0.350, 0.222, 0.222, 0.333, 0.333, 0.350, 0.556, 1.000, 0.333, 1.000, 0.500, 0.333, 0.944, 0.350, 0.500, 0.667,
        // 0xA0  nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.260, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // 0xB0  °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.556, 0.537, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // 0xC0  À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.667, 0.667, 0.667, 0.667, 0.667, 0.667, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // 0xD0  Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // 0xE0  à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.500, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // 0xF0  ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.584, 0.611, 0.556, 0.556, 0.556, 0.556, 0.500, 0.556, 0.500,
    ],
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // 0x20  sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0x30  0-9, :      ;      <      =      >      ?
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.333, 0.333, 0.584, 0.584, 0.584, 0.611,
        // 0x40  @      A      B      C      D      E      F      G      H      I      J      K      L      M      N      O
        0.975, 0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833, 0.722, 0.778,
        // 0x50  P      Q      R      S      T      U      V      W      X      Y      Z      [      \      ]      ^      _
        0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611, 0.333, 0.278, 0.333, 0.584, 0.556,
        // 0x60  `      a      b      c      d      e      f      g      h      i      j      k      l      m      n      o
        0.333, 0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889, 0.611, 0.611,
        // 0x70  p      q      r      s      t      u      v      w      x      y      z      {      |      }      ~      DEL
        0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500, 0.389, 0.280, 0.389, 0.584, 0.350,
        // 0x80  €      -      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      -      Ž      -
        0.556, 0.350, 0.278, 0.556, 0.500, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.350, 0.611, 0.350,
        // 0x90  -      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      -      ž      Ÿ
        0.350, 0.278, 0.278, 0.500, 0.500, 0.350, 0.556, 1.000, 0.333, 1.000, 0.556, 0.333, 0.944, 0.350, 0.500, 0.667,
        // 0xA0  nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.280, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // 0xB0  °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.611, 0.556, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // 0xC0  À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.722, 0.722, 0.722, 0.722, 0.722, 0.722, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // 0xD0  Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // 0xE0  à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // 0xF0  ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.584, 0.611, 0.611, 0.611, 0.611, 0.611, 0.556, 0.611, 0.556,
    ],
    space_width: 0.278,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width_matches_table_slot() {
        for font in [BaseFont::Helvetica, BaseFont::HelveticaBold] {
            let m = get_metrics(font);
            assert_eq!(m.char_width(' '), m.space_width);
        }
    }

    #[test]
    fn test_bold_is_never_narrower_for_lowercase() {
        let regular = get_metrics(BaseFont::Helvetica);
        let bold = get_metrics(BaseFont::HelveticaBold);
        for c in 'a'..='z' {
            assert!(
                bold.char_width(c) >= regular.char_width(c),
                "bold '{c}' narrower than regular"
            );
        }
    }

    #[test]
    fn test_measure_pt_scales_with_size() {
        let m = get_metrics(BaseFont::Helvetica);
        let at_10 = m.measure_pt("Engineer", 10.0);
        let at_20 = m.measure_pt("Engineer", 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-4);
    }

    #[test]
    fn test_upper_half_glyphs_use_afm_widths() {
        // Values from Helvetica.afm / Helvetica-Bold.afm.
        let regular = get_metrics(BaseFont::Helvetica);
        for (c, width) in [
            ('—', 1.000),
            ('…', 1.000),
            ('™', 1.000),
            ('‰', 1.000),
            ('Æ', 1.000),
            ('Œ', 1.000),
            ('–', 0.556),
            ('“', 0.333),
            ('é', 0.556),
            ('ç', 0.500),
            ('©', 0.737),
        ] {
            assert_eq!(regular.char_width(c), width, "Helvetica '{c}'");
        }

        let bold = get_metrics(BaseFont::HelveticaBold);
        for (c, width) in [('—', 1.000), ('“', 0.500), ('ç', 0.556), ('ñ', 0.611)] {
            assert_eq!(bold.char_width(c), width, "Helvetica-Bold '{c}'");
        }
    }

    #[test]
    fn test_unencodable_chars_measure_as_replacement() {
        for font in [BaseFont::Helvetica, BaseFont::HelveticaBold] {
            let m = get_metrics(font);
            assert_eq!(m.char_width('漢'), m.char_width('?'));
            assert_eq!(m.char_width('🚀'), m.char_width('?'));
        }
    }

    #[test]
    fn test_win_ansi_code_page() {
        assert_eq!(win_ansi_code('A'), Some(b'A'));
        assert_eq!(win_ansi_code('\t'), Some(b' '));
        assert_eq!(win_ansi_code('é'), Some(0xE9));
        assert_eq!(win_ansi_code('—'), Some(0x97));
        assert_eq!(win_ansi_code('€'), Some(0x80));
        assert_eq!(win_ansi_code('\u{0085}'), None);
        assert_eq!(win_ansi_code('漢'), None);
    }

    #[test]
    fn test_default_page_is_a4_with_printable_area() {
        let cfg = default_page_config();
        assert!((cfg.printable_width() - (595.28 - 20.0 * MM)).abs() < 1e-3);
        assert!((cfg.printable_height() - (841.89 - 25.0 * MM)).abs() < 1e-3);
    }
}
