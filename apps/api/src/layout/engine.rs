//! Résumé layout engine: sequential vertical flow with automatic pagination.
//!
//! # Flow
//! 1. Identity block: name (bold 24pt, centered), contact line (10pt, centered), gap.
//! 2. Summary → Experience → Skills, each only when non-empty. A section opens with a bold
//!    heading, a full-width rule directly under it, and a small gap.
//! 3. Before a block is placed, if it would cross the printable bottom and the cursor is
//!    not already at the top of a page, a new page starts.
//!
//! # Keep-together rules
//! - A section heading is kept with its rule and its first body block.
//! - An experience title is kept with its description.
//! - When a lead and its body cannot share any page, only the body's first line is kept
//!   with the lead and the body flows across pages, split at line boundaries.
//! - A paragraph taller than a whole printable page is split the same way.
//!   Any other block is never split.

use thiserror::Error;
use tracing::debug;

use crate::layout::cursor::LayoutCursor;
use crate::layout::font_metrics::{BaseFont, PageConfig, MM};
use crate::layout::model::{
    Align, Block, BlockKind, DocumentLayout, PageLayout, PlacedBlock, Section,
};
use crate::layout::wrap::wrap_text;
use crate::models::resume::{ExperienceEntry, ResumeDocument};

// ────────────────────────────────────────────────────────────────────────────
// Typography
// ────────────────────────────────────────────────────────────────────────────

/// Font, size, line height and alignment shared by every block of one role.
#[derive(Clone, Copy)]
struct TextStyle {
    font: BaseFont,
    size_pt: f32,
    line_height_pt: f32,
    align: Align,
}

const NAME: TextStyle = TextStyle {
    font: BaseFont::HelveticaBold,
    size_pt: 24.0,
    line_height_pt: 10.0 * MM,
    align: Align::Center,
};
const CONTACT: TextStyle = TextStyle {
    font: BaseFont::Helvetica,
    size_pt: 10.0,
    line_height_pt: 5.0 * MM,
    align: Align::Center,
};
const HEADING: TextStyle = TextStyle {
    font: BaseFont::HelveticaBold,
    size_pt: 14.0,
    line_height_pt: 8.0 * MM,
    align: Align::Left,
};
const BODY: TextStyle = TextStyle {
    font: BaseFont::Helvetica,
    size_pt: 11.0,
    line_height_pt: 5.0 * MM,
    align: Align::Left,
};
const ENTRY_TITLE: TextStyle = TextStyle {
    font: BaseFont::HelveticaBold,
    size_pt: 12.0,
    line_height_pt: 6.0 * MM,
    align: Align::Left,
};

const IDENTITY_GAP: f32 = 10.0 * MM;
const RULE_GAP: f32 = 2.0 * MM;
const SUMMARY_GAP: f32 = 5.0 * MM;
const ENTRY_GAP: f32 = 3.0 * MM;
const EXPERIENCE_GAP: f32 = 2.0 * MM;

/// Heading line plus the gap under its rule.
const SECTION_HEADER: f32 = HEADING.line_height_pt + RULE_GAP;

/// The tallest single line the engine ever emits. A page must hold at least this much.
const TALLEST_LINE: f32 = NAME.line_height_pt;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid page geometry: {0}")]
    InvalidPage(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out a validated résumé onto pages. Always yields at least one page.
pub fn layout_document(
    document: &ResumeDocument,
    page: &PageConfig,
) -> Result<DocumentLayout, LayoutError> {
    check_page(page)?;

    let mut engine = LayoutEngine::new(page);
    engine.identity(document);

    if let Some(summary) = document.summary_text() {
        engine.paragraph_section(Section::Summary, summary);
        engine.gap(SUMMARY_GAP);
    }

    let entries: Vec<&ExperienceEntry> = document.visible_experience().collect();
    if !entries.is_empty() {
        engine.experience_section(&entries);
        engine.gap(EXPERIENCE_GAP);
    }

    if let Some(skills) = document.skills_text() {
        engine.paragraph_section(Section::Skills, skills);
    }

    let layout = engine.finish();
    debug!(
        pages = layout.page_count(),
        blocks = layout.blocks().count(),
        "Layout complete"
    );
    Ok(layout)
}

fn check_page(page: &PageConfig) -> Result<(), LayoutError> {
    let width = page.printable_width();
    let height = page.printable_height();
    if !width.is_finite() || !height.is_finite() {
        return Err(LayoutError::InvalidPage(
            "page dimensions must be finite".to_string(),
        ));
    }
    if width <= 0.0 {
        return Err(LayoutError::InvalidPage(format!(
            "printable width {width:.2}pt must be positive"
        )));
    }
    if height < TALLEST_LINE {
        return Err(LayoutError::InvalidPage(format!(
            "printable height {height:.2}pt cannot hold a {TALLEST_LINE:.2}pt line"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

struct LayoutEngine<'a> {
    page: &'a PageConfig,
    cursor: LayoutCursor,
    pages: Vec<PageLayout>,
}

impl<'a> LayoutEngine<'a> {
    fn new(page: &'a PageConfig) -> Self {
        Self {
            page,
            cursor: LayoutCursor::new(page.printable_height()),
            pages: vec![PageLayout::new(0)],
        }
    }

    fn finish(self) -> DocumentLayout {
        DocumentLayout {
            page: self.page.clone(),
            pages: self.pages,
        }
    }

    fn text_block(
        &self,
        kind: BlockKind,
        section: Option<Section>,
        style: TextStyle,
        text: &str,
    ) -> Block {
        Block {
            kind,
            section,
            font: style.font,
            size_pt: style.size_pt,
            line_height_pt: style.line_height_pt,
            align: style.align,
            lines: wrap_text(text, style.font, style.size_pt, self.page.printable_width()),
        }
    }

    // ── sections ──────────────────────────────────────────────────────────

    fn identity(&mut self, document: &ResumeDocument) {
        let name = self.text_block(BlockKind::Heading, None, NAME, &document.full_name);
        let contact_line = document.contact_line();
        let contact = self.text_block(BlockKind::Paragraph, None, CONTACT, &contact_line);
        self.place(name, false);
        self.place(contact, false);
        self.gap(IDENTITY_GAP);
    }

    /// Heading + rule + gap, kept together with `body_reserve` points of the section body.
    fn section_header(&mut self, section: Section, body_reserve: f32) {
        let heading = self.text_block(BlockKind::Heading, Some(section), HEADING, section.title());
        self.keep_together(heading.height() + RULE_GAP + body_reserve);
        self.place(heading, false);
        self.place(Block::rule(section), false);
        self.gap(RULE_GAP);
    }

    fn paragraph_block(&self, section: Section, text: &str) -> Block {
        self.text_block(BlockKind::Paragraph, Some(section), BODY, text)
    }

    fn paragraph_section(&mut self, section: Section, text: &str) {
        let body = self.paragraph_block(section, text);
        let (reserve, flow) = self.reserve(SECTION_HEADER, Some(&body));
        self.section_header(section, reserve - SECTION_HEADER);
        self.place(body, flow);
    }

    fn experience_section(&mut self, entries: &[&ExperienceEntry]) {
        for (i, entry) in entries.iter().enumerate() {
            let title = self.entry_title(entry);
            let description = Some(entry.description.trim())
                .filter(|d| !d.is_empty())
                .map(|d| self.paragraph_block(Section::Experience, d));
            let lead = title.as_ref().map_or(0.0, Block::height);

            let flow = if i == 0 {
                // The header travels with the first entry.
                let (reserve, flow) = self.reserve(SECTION_HEADER + lead, description.as_ref());
                self.section_header(Section::Experience, reserve - SECTION_HEADER);
                flow
            } else {
                let (reserve, flow) = self.reserve(lead, description.as_ref());
                self.keep_together(reserve);
                flow
            };

            if let Some(title) = title {
                self.place(title, false);
            }
            if let Some(description) = description {
                self.place(description, flow);
            }
            self.gap(ENTRY_GAP);
        }
    }

    fn entry_title(&self, entry: &ExperienceEntry) -> Option<Block> {
        let title = entry.title();
        if title.is_empty() {
            return None;
        }
        Some(self.text_block(
            BlockKind::ListEntry,
            Some(Section::Experience),
            ENTRY_TITLE,
            &title,
        ))
    }

    /// How much room a lead of `lead` points must find together with its body.
    ///
    /// When lead and body can share one page the whole body is reserved and the body is
    /// never split. Otherwise only the body's first line is reserved and the body flows
    /// from directly under the lead (returned flag = true).
    fn reserve(&self, lead: f32, body: Option<&Block>) -> (f32, bool) {
        match body {
            None => (lead, false),
            Some(body) if lead + body.height() <= self.page.printable_height() => {
                (lead + body.height(), false)
            }
            Some(body) => (lead + body.line_height_pt, true),
        }
    }

    // ── cursor discipline ─────────────────────────────────────────────────

    /// Advances the cursor without placing a block. Gaps are dropped at the top of a page.
    fn gap(&mut self, height: f32) {
        if !self.cursor.at_page_top() {
            self.cursor.advance(height);
        }
    }

    /// Starts a new page unless `height` fits on the current one.
    fn keep_together(&mut self, height: f32) {
        let height = height.min(self.page.printable_height());
        if !self.cursor.fits(height) && !self.cursor.at_page_top() {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        self.cursor.new_page();
        self.pages.push(PageLayout::new(self.cursor.page_index()));
    }

    /// Places a block at the cursor, breaking the page first if it does not fit.
    ///
    /// A multi-line block is split at line boundaries instead when it is taller than a
    /// whole printable page, or when `flow` is set (it must start under its lead).
    fn place(&mut self, mut block: Block, flow: bool) {
        let mut flow = flow || block.height() > self.page.printable_height();
        loop {
            let height = block.height();
            if !self.cursor.fits(height) && !self.cursor.at_page_top() && !flow {
                self.new_page();
            }

            if block.lines.len() <= 1 {
                if !self.cursor.fits(height) && !self.cursor.at_page_top() {
                    self.new_page();
                }
                self.push(block);
                return;
            }
            if self.cursor.fits(height) {
                self.push(block);
                return;
            }

            let fitting = (self.cursor.remaining() / block.line_height_pt).floor() as usize;
            if fitting == 0 {
                self.new_page();
                continue;
            }
            let rest = Block {
                lines: block.lines.split_off(fitting.min(block.lines.len() - 1)),
                ..block.clone()
            };
            self.push(block);
            block = rest;
            flow = true;
        }
    }

    fn push(&mut self, block: Block) {
        let height = block.height();
        let placed = PlacedBlock {
            page_index: self.cursor.page_index(),
            y_pt: self.cursor.y(),
            block,
        };
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(placed);
        }
        self.cursor.advance(height);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
