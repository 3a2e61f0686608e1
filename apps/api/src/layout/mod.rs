// Document Layout Engine
// Implements: static font metrics, word wrapping, vertical cursor, paginated block placement.
// CPU-bound; callers on the async runtime run it inside tokio::task::spawn_blocking.

pub mod cursor;
pub mod engine;
pub mod font_metrics;
pub mod model;
pub mod page_fill;
pub mod wrap;

// Re-export the public API consumed by the renderer and handlers.
pub use engine::layout_document;
pub use font_metrics::{default_page_config, BaseFont, PageConfig};
pub use model::{BlockKind, Section};
