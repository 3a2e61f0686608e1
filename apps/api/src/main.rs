mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod transform;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::transform::TextTransformService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting résumé API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize text transform provider
    let transformer = TextTransformService::from_config(&config)?;
    info!(
        provider = transformer.provider_name(),
        timeout_ms = transformer.timeout().as_millis() as u64,
        "Text transform provider initialized"
    );
    if config.transform_provider == config::TransformProvider::Anthropic {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    }

    // Initialize layout page config (A4, 10mm sides and top, 15mm bottom)
    let page_config = default_page_config();
    info!(
        "Layout page config: {}x{}pt",
        page_config.width_pt, page_config.height_pt
    );

    let state = AppState {
        transformer: Arc::new(transformer),
        page_config,
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
