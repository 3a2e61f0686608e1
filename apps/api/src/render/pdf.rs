//! PDF serialization of a finished `DocumentLayout` via `pdf-writer`.
//!
//! Object layout: catalog, page tree, two Type1 base-14 fonts, the info dictionary, then a
//! (page, content stream) pair per laid-out page. Everything is written into one in-memory
//! buffer owned by the caller; nothing touches the filesystem.

use chrono::{Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::model::{Align, BlockKind, DocumentLayout, PlacedBlock};
use crate::layout::{BaseFont, PageConfig};
use crate::render::encoding::encode_win_ansi;

const RULE_WIDTH_PT: f32 = 0.5;
/// Baseline offset below the vertical centre of a line cell, as a fraction of font size.
const BASELINE_DROP: f32 = 0.3;
const PRODUCER: &str = "resume-api";

const FONTS: [BaseFont; 2] = [BaseFont::Helvetica, BaseFont::HelveticaBold];

#[derive(Debug)]
pub struct PdfOutput {
    pub bytes: Vec<u8>,
    /// Characters replaced with `?` because WinAnsi cannot encode them.
    pub replaced_chars: usize,
}

/// Sequential object-id allocator.
struct RefAlloc(i32);

impl RefAlloc {
    fn next(&mut self) -> Ref {
        self.0 += 1;
        Ref::new(self.0)
    }
}

/// Serializes `layout` into PDF bytes. `title` goes into the document info dictionary.
pub fn write_pdf(layout: &DocumentLayout, title: &str) -> PdfOutput {
    let mut alloc = RefAlloc(0);
    let catalog_id = alloc.next();
    let page_tree_id = alloc.next();
    let font_ids: Vec<(BaseFont, Ref)> = FONTS.iter().map(|&f| (f, alloc.next())).collect();
    let info_id = alloc.next();
    let page_ids: Vec<(Ref, Ref)> = layout
        .pages
        .iter()
        .map(|_| (alloc.next(), alloc.next()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    for (font, id) in &font_ids {
        pdf.type1_font(*id)
            .base_font(Name(font.postscript_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let now = Utc::now();
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(PRODUCER))
        .creation_date(
            Date::new(now.year() as u16)
                .month(now.month() as u8)
                .day(now.day() as u8)
                .hour(now.hour() as u8)
                .minute(now.minute() as u8)
                .second(now.second() as u8)
                .utc_offset_hour(0),
        );

    let geometry = &layout.page;
    let mut replaced_chars = 0;

    for (page_layout, (page_id, content_id)) in layout.pages.iter().zip(&page_ids) {
        let mut content = Content::new();
        for placed in &page_layout.blocks {
            replaced_chars += draw_block(&mut content, placed, geometry);
        }
        pdf.stream(*content_id, &content.finish());

        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, geometry.width_pt, geometry.height_pt));
        page.parent(page_tree_id);
        page.contents(*content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (font, id) in &font_ids {
                fonts.pair(Name(font.resource_name().as_bytes()), *id);
            }
        }
        page.finish();
    }

    PdfOutput {
        bytes: pdf.finish(),
        replaced_chars,
    }
}

/// Converts a downward offset inside the printable area to PDF user space (origin bottom-left).
fn to_pdf_y(geometry: &PageConfig, y_down: f32) -> f32 {
    geometry.height_pt - geometry.margin_top_pt - y_down
}

/// Emits one block. Returns the number of replaced characters.
fn draw_block(content: &mut Content, placed: &PlacedBlock, geometry: &PageConfig) -> usize {
    let block = &placed.block;

    if block.kind == BlockKind::Rule {
        let y = to_pdf_y(geometry, placed.y_pt);
        content.set_line_width(RULE_WIDTH_PT);
        content.move_to(geometry.margin_left_pt, y);
        content.line_to(geometry.width_pt - geometry.margin_right_pt, y);
        content.stroke();
        return 0;
    }

    let metrics = crate::layout::font_metrics::get_metrics(block.font);
    let font_name = Name(block.font.resource_name().as_bytes());
    let mut replaced = 0;

    for (i, line) in block.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let cell_top = placed.y_pt + i as f32 * block.line_height_pt;
        let baseline = cell_top + 0.5 * block.line_height_pt + BASELINE_DROP * block.size_pt;
        let x = match block.align {
            Align::Left => geometry.margin_left_pt,
            Align::Center => {
                let text_width = metrics.measure_pt(line, block.size_pt);
                geometry.margin_left_pt + (geometry.printable_width() - text_width).max(0.0) / 2.0
            }
        };

        let encoded = encode_win_ansi(line);
        replaced += encoded.replaced;

        content.begin_text();
        content.set_font(font_name, block.size_pt);
        content.next_line(x, to_pdf_y(geometry, baseline));
        content.show(Str(&encoded.bytes));
        content.end_text();
    }
    replaced
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
