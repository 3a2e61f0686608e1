//! Axum route handlers for PDF generation and layout preview.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::layout::model::{Block, PlacedBlock};
use crate::layout::page_fill::{analyze_page_fill, PageFillAnalysis};
use crate::layout::{layout_document, BlockKind, Section};
use crate::models::resume::ResumePayload;
use crate::render::encoding::count_unencodable;
use crate::render::render_blocking;
use crate::state::AppState;

const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"My_Resume.pdf\"";
const X_PAGE_COUNT: &str = "x-page-count";
const X_UNUSED_FIELDS: &str = "x-unused-fields";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub page_index: usize,
    pub kind: BlockKind,
    pub section: Option<Section>,
    pub y_pt: f32,
    pub height_pt: f32,
    pub lines: Vec<String>,
}

impl From<&PlacedBlock> for BlockSummary {
    fn from(placed: &PlacedBlock) -> Self {
        let Block {
            kind,
            section,
            lines,
            ..
        } = &placed.block;
        BlockSummary {
            page_index: placed.page_index,
            kind: *kind,
            section: *section,
            y_pt: placed.y_pt,
            height_pt: placed.block.height(),
            lines: lines.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPreviewResponse {
    pub page_count: usize,
    pub sections: Vec<&'static str>,
    pub page_fill: Vec<PageFillAnalysis>,
    pub blocks: Vec<BlockSummary>,
    pub unused_fields: Vec<&'static str>,
    pub unencodable_chars: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-pdf
///
/// Validates the résumé, lays it out, and streams back a freshly rendered PDF.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    payload: Result<Json<ResumePayload>, JsonRejection>,
) -> Result<(HeaderMap, Bytes), AppError> {
    let Json(payload) = payload?;
    let document = payload.validate()?;
    let unused = document.unused_fields();

    let rendered = render_blocking(document, state.page_config.clone()).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static(DOWNLOAD_DISPOSITION),
    );
    headers.insert(X_PAGE_COUNT, HeaderValue::from(rendered.page_count));
    if !unused.is_empty() {
        let value = HeaderValue::from_str(&unused.join(", "))
            .map_err(|e| AppError::Internal(e.into()))?;
        headers.insert(X_UNUSED_FIELDS, value);
    }

    Ok((headers, Bytes::from(rendered.bytes)))
}

/// POST /api/layout-preview
///
/// Same input as generate-pdf; returns the computed layout instead of PDF bytes.
pub async fn handle_layout_preview(
    State(state): State<AppState>,
    payload: Result<Json<ResumePayload>, JsonRejection>,
) -> Result<Json<LayoutPreviewResponse>, AppError> {
    let Json(payload) = payload?;
    let document = payload.validate()?;
    let page = state.page_config.clone();

    let preview = tokio::task::spawn_blocking(move || {
        let layout =
            layout_document(&document, &page).map_err(|e| AppError::Render(e.to_string()))?;
        Ok::<_, AppError>(LayoutPreviewResponse {
            page_count: layout.page_count(),
            sections: layout.sections().into_iter().map(Section::title).collect(),
            page_fill: analyze_page_fill(&layout),
            blocks: layout.blocks().map(BlockSummary::from).collect(),
            unused_fields: document.unused_fields(),
            unencodable_chars: count_unencodable(&layout.all_text()),
        })
    })
    .await
    .map_err(|e| AppError::Render(format!("layout task failed: {e}")))??;

    Ok(Json(preview))
}
