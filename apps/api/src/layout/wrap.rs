//! Greedy word-wrap against the static font-metric tables.
//! Characters are measured by the WinAnsi glyph the renderer will print for them.
//!
//! # Rules
//! - Explicit `\n` (or `\r\n`) always starts a new line; blank input lines are kept as empty lines.
//! - Words are joined with a single space and never split unless a word alone is wider
//!   than the line, in which case it is hard-broken at character boundaries.
//! - No returned line is wider than `max_width_pt` (except a lone character on a line
//!   narrower than that character).

use crate::layout::font_metrics::{get_metrics, BaseFont, FontMetricTable};

/// Wraps `text` to `max_width_pt` at `size_pt`. Returns the printed lines in order.
///
/// Empty or whitespace-only input returns an empty vector.
pub fn wrap_text(text: &str, font: BaseFont, size_pt: f32, max_width_pt: f32) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let metrics = get_metrics(font);
    // Work in em units so the per-word measurement matches `measure_str`.
    let max_width = max_width_pt / size_pt;

    let mut lines = Vec::new();
    for raw_line in text.lines() {
        wrap_paragraph(raw_line, metrics, max_width, &mut lines);
    }
    lines
}

/// Returns the rendered width of the widest line in points.
#[cfg(test)]
pub fn widest_line_pt(lines: &[String], font: BaseFont, size_pt: f32) -> f32 {
    let metrics = get_metrics(font);
    lines
        .iter()
        .map(|l| metrics.measure_pt(l, size_pt))
        .fold(0.0_f32, f32::max)
}

fn wrap_paragraph(
    paragraph: &str,
    metrics: &FontMetricTable,
    max_width: f32,
    out: &mut Vec<String>,
) {
    let words: Vec<&str> = paragraph.split_whitespace().collect();
    if words.is_empty() {
        out.push(String::new());
        return;
    }

    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in words {
        let word_w = metrics.measure_str(word);

        if word_w > max_width {
            // Oversized word: flush what we have, then break the word itself.
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            let mut chunks = hard_break(word, metrics, max_width);
            // The final chunk stays open so following words can share its line.
            if let Some(last) = chunks.pop() {
                out.extend(chunks);
                current_width = metrics.measure_str(&last);
                current = last;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + metrics.space_width + word_w <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += metrics.space_width + word_w;
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
}

/// Splits a single word into chunks no wider than `max_width` (em units).
/// Every chunk holds at least one character.
fn hard_break(word: &str, metrics: &FontMetricTable, max_width: f32) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut width = 0.0_f32;

    for c in word.chars() {
        let w = metrics.char_width(c);
        if !chunk.is_empty() && width + w > max_width {
            chunks.push(std::mem::take(&mut chunk));
            width = 0.0;
        }
        chunk.push(c);
        width += w;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 200.0;

    #[test]
    fn test_empty_text_yields_no_lines() {
        assert!(wrap_text("", BaseFont::Helvetica, 11.0, WIDTH).is_empty());
        assert!(wrap_text("   \n  ", BaseFont::Helvetica, 11.0, WIDTH).is_empty());
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_text("Engineer.", BaseFont::Helvetica, 11.0, WIDTH);
        assert_eq!(lines, vec!["Engineer.".to_string()]);
    }

    #[test]
    fn test_long_text_wraps_without_exceeding_width() {
        let text = "Designed and operated a fleet of ingestion services handling \
                    millions of events per day across three regions with strict latency budgets.";
        let lines = wrap_text(text, BaseFont::Helvetica, 11.0, WIDTH);
        assert!(lines.len() > 1);
        assert!(widest_line_pt(&lines, BaseFont::Helvetica, 11.0) <= WIDTH);
        // Word order and content are preserved.
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_explicit_newlines_start_new_lines() {
        let lines = wrap_text("Rust\n\nGo", BaseFont::Helvetica, 11.0, WIDTH);
        assert_eq!(lines, vec!["Rust".to_string(), String::new(), "Go".to_string()]);
    }

    #[test]
    fn test_crlf_is_treated_as_newline() {
        let lines = wrap_text("a\r\nb", BaseFont::Helvetica, 11.0, WIDTH);
        assert_eq!(lines, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_oversized_word_is_hard_broken() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, BaseFont::HelveticaBold, 12.0, WIDTH);
        assert!(lines.len() > 1);
        assert!(widest_line_pt(&lines, BaseFont::HelveticaBold, 12.0) <= WIDTH);
        assert_eq!(lines.concat(), word);
    }

    /// Helvetica AFM widths for the glyphs used below, written out independently of the
    /// metric tables so the check cannot share a mistake with them.
    fn afm_helvetica_em(c: char) -> f32 {
        match c {
            ' ' => 0.278,
            '—' | '…' | '™' | '‰' | 'Æ' | 'Œ' => 1.000,
            other => panic!("no reference width for {other:?}"),
        }
    }

    #[test]
    fn test_wide_win_ansi_glyphs_stay_inside_width() {
        let text = "—— …™ ‰Æ Œ— ".repeat(40);
        let size = 11.0;
        let lines = wrap_text(&text, BaseFont::Helvetica, size, WIDTH);
        assert!(lines.len() > 1);
        for line in &lines {
            let width: f32 = line.chars().map(afm_helvetica_em).sum::<f32>() * size;
            assert!(width <= WIDTH + 1e-3, "line {width:.1}pt exceeds {WIDTH}pt: {line:?}");
        }
        // Each 2-glyph word is 22pt and a space 3.058pt, so exactly 8 words fit in 200pt.
        assert_eq!(lines[0].split(' ').count(), 8);
    }

    #[test]
    fn test_word_after_hard_break_shares_last_chunk_line() {
        let text = format!("{} ok", "m".repeat(40));
        let lines = wrap_text(&text, BaseFont::Helvetica, 11.0, WIDTH);
        assert!(lines.last().is_some_and(|l| l.ends_with(" ok")));
    }
}
