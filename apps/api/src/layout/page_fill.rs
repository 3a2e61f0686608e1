//! Page Fill Analysis: how much of each printable page a finished layout uses.
//!
//! # Page fill rules
//! - A non-final page below 75% fill broke early (a large block was moved whole).
//! - A final page (other than the first) below 15% fill is a spill page: a few lines
//!   that a shorter summary or description would pull back onto the previous page.

use serde::Serialize;

use crate::layout::model::DocumentLayout;

const MIN_INNER_PAGE_FILL: f32 = 0.75;
const SPILL_PAGE_FILL: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    Acceptable,
    TooMuchWhitespace,
    SpillPage,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFillAnalysis {
    pub page_index: usize,
    pub used_pt: f32,
    pub available_pt: f32,
    pub fill_fraction: f32,
    pub whitespace_fraction: f32,
    pub verdict: PageFillVerdict,
}

/// Analyzes the fill of every page of a layout, in page order.
pub fn analyze_page_fill(layout: &DocumentLayout) -> Vec<PageFillAnalysis> {
    let available = layout.page.printable_height();
    let last = layout.page_count().saturating_sub(1);

    layout
        .pages
        .iter()
        .map(|page| {
            let used = page.used_height();
            let fill_fraction = (used / available).clamp(0.0, 1.0);

            let verdict = if page.index < last && fill_fraction < MIN_INNER_PAGE_FILL {
                PageFillVerdict::TooMuchWhitespace
            } else if page.index == last && page.index > 0 && fill_fraction < SPILL_PAGE_FILL {
                PageFillVerdict::SpillPage
            } else {
                PageFillVerdict::Acceptable
            };

            PageFillAnalysis {
                page_index: page.index,
                used_pt: used,
                available_pt: available,
                fill_fraction,
                whitespace_fraction: 1.0 - fill_fraction,
                verdict,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::engine::layout_document;
    use crate::layout::font_metrics::default_page_config;
    use crate::models::resume::{jane_doe, ExperienceEntry};

    #[test]
    fn test_single_short_page_is_acceptable() {
        let layout = layout_document(&jane_doe(), &default_page_config()).unwrap();
        let report = analyze_page_fill(&layout);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].verdict, PageFillVerdict::Acceptable);
        assert!(report[0].fill_fraction > 0.0 && report[0].fill_fraction < 0.5);
        assert!((report[0].fill_fraction + report[0].whitespace_fraction - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_trailing_entry_is_a_spill_page() {
        // 15 entries fill page one exactly; the 16th spills alone onto page two.
        let mut doc = jane_doe();
        doc.skills = None;
        doc.experience = (0..16)
            .map(|i| ExperienceEntry {
                role: format!("Role {i}"),
                company: "Acme".to_string(),
                description: "Did work.".to_string(),
            })
            .collect();
        let layout = layout_document(&doc, &default_page_config()).unwrap();
        let report = analyze_page_fill(&layout);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].verdict, PageFillVerdict::Acceptable);
        assert_eq!(report[1].verdict, PageFillVerdict::SpillPage);
    }
}
