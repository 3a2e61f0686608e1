use std::sync::Arc;

use crate::layout::PageConfig;
use crate::transform::TextTransformService;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; every request gets its own render buffer.
#[derive(Clone)]
pub struct AppState {
    /// Summary rewrite provider behind a timeout and echo fallback.
    pub transformer: Arc<TextTransformService>,
    /// Page geometry for every rendered résumé (A4, 10mm sides and top, 15mm bottom).
    pub page_config: PageConfig,
}
