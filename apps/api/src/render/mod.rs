// Document Renderer
// Layout → PDF bytes in a per-request buffer. No shared output path.

pub mod encoding;
pub mod handlers;
pub mod pdf;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::layout::{layout_document, PageConfig};
use crate::models::resume::ResumeDocument;

/// A finished document. The buffer belongs to exactly one request.
#[derive(Debug)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Lays out and serializes one résumé. CPU-bound; see `render_blocking`.
pub fn render(document: &ResumeDocument, page: &PageConfig) -> Result<RenderedDocument, AppError> {
    let layout = layout_document(document, page).map_err(|e| AppError::Render(e.to_string()))?;
    let output = pdf::write_pdf(&layout, &document_title(&document.full_name));

    if output.replaced_chars > 0 {
        warn!(
            replaced = output.replaced_chars,
            "Characters outside WinAnsi were replaced with '?'"
        );
    }
    info!(
        pages = layout.page_count(),
        bytes = output.bytes.len(),
        "Rendered résumé"
    );

    Ok(RenderedDocument {
        bytes: output.bytes,
        page_count: layout.page_count(),
    })
}

/// Title stored in the PDF info dictionary.
fn document_title(full_name: &str) -> String {
    format!("{full_name} — Résumé")
}

/// Runs `render` on the blocking pool so the async executor stays free.
pub async fn render_blocking(
    document: ResumeDocument,
    page: PageConfig,
) -> Result<RenderedDocument, AppError> {
    tokio::task::spawn_blocking(move || render(&document, &page))
        .await
        .map_err(|e| AppError::Render(format!("render task failed: {e}")))?
}
