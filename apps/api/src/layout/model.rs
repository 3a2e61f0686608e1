//! Layout output types: blocks, placed blocks, pages, and the finished document layout.

use serde::Serialize;

use crate::layout::font_metrics::{BaseFont, PageConfig};

/// The named, independently omittable groups of blocks, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Experience,
    Skills,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "Professional Summary",
            Section::Experience => "Experience",
            Section::Skills => "Skills",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    Rule,
    Paragraph,
    ListEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
}

/// A discrete layout unit with a declared height.
///
/// Text blocks hold their already-wrapped lines; the declared height is
/// `lines.len() * line_height_pt`. A rule has no lines and a height of zero.
#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub section: Option<Section>,
    pub font: BaseFont,
    pub size_pt: f32,
    pub line_height_pt: f32,
    pub align: Align,
    pub lines: Vec<String>,
}

impl Block {
    pub fn height(&self) -> f32 {
        match self.kind {
            BlockKind::Rule => 0.0,
            _ => self.lines.len() as f32 * self.line_height_pt,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub(crate) fn rule(section: Section) -> Self {
        Block {
            kind: BlockKind::Rule,
            section: Some(section),
            font: BaseFont::Helvetica,
            size_pt: 0.0,
            line_height_pt: 0.0,
            align: Align::Left,
            lines: Vec::new(),
        }
    }
}

/// A block after placement. `y_pt` is measured downward from the top of the printable area.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedBlock {
    pub page_index: usize,
    pub y_pt: f32,
    #[serde(flatten)]
    pub block: Block,
}

impl PlacedBlock {
    pub fn bottom(&self) -> f32 {
        self.y_pt + self.block.height()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageLayout {
    pub index: usize,
    pub blocks: Vec<PlacedBlock>,
}

impl PageLayout {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            blocks: Vec::new(),
        }
    }

    /// Bottom edge of the lowest block on this page (0 for an empty page).
    pub fn used_height(&self) -> f32 {
        self.blocks
            .iter()
            .map(PlacedBlock::bottom)
            .fold(0.0_f32, f32::max)
    }
}

/// The finished layout of one résumé. Always holds at least one page.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentLayout {
    pub page: PageConfig,
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    /// Section headings in the order they were placed.
    pub fn sections(&self) -> Vec<Section> {
        self.blocks()
            .filter(|b| b.block.kind == BlockKind::Heading)
            .filter_map(|b| b.block.section)
            .collect()
    }

    /// Text of every block in a section, one entry per block.
    #[cfg(test)]
    pub fn section_text(&self, section: Section) -> Vec<String> {
        self.blocks()
            .filter(|b| b.block.section == Some(section) && b.block.kind != BlockKind::Rule)
            .map(|b| b.block.text())
            .collect()
    }

    /// All text on all pages, blocks separated by newlines.
    pub fn all_text(&self) -> String {
        self.blocks()
            .filter(|b| !b.block.lines.is_empty())
            .map(|b| b.block.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
