//! Text Transform: pluggable rewrite of the free-text summary.
//!
//! `AppState` holds a `TextTransformService`, which owns an `Arc<dyn TextTransformer>`
//! chosen at startup from `TEXT_TRANSFORM_PROVIDER`. The service bounds every call by
//! a timeout and answers with the original text when the provider cannot.

pub mod handlers;
pub mod prompts;
pub mod providers;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, TransformProvider};
use crate::llm_client::{LlmClient, LlmError};
use providers::{EchoTransformer, LlmTransformer, TemplateTransformer};

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider failed: {0}")]
    Provider(#[from] LlmError),

    #[error("provider returned empty text")]
    EmptyOutput,
}

/// A text rewrite backend. Implement this to add a provider without touching
/// the handler or the router.
#[async_trait]
pub trait TextTransformer: Send + Sync {
    /// Short name used in logs and `/health`.
    fn name(&self) -> &'static str;

    async fn transform(&self, raw: &str) -> Result<String, TransformError>;
}

/// Timeout and fallback policy around a `TextTransformer`.
pub struct TextTransformService {
    provider: Arc<dyn TextTransformer>,
    timeout: Duration,
}

impl TextTransformService {
    pub fn new(provider: Arc<dyn TextTransformer>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Builds the provider named by the config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider: Arc<dyn TextTransformer> = match config.transform_provider {
            TransformProvider::Echo => Arc::new(EchoTransformer),
            TransformProvider::Template => Arc::new(TemplateTransformer),
            TransformProvider::Anthropic => {
                let api_key = config.anthropic_api_key.clone().ok_or_else(|| {
                    anyhow::anyhow!("ANTHROPIC_API_KEY is required for the anthropic provider")
                })?;
                let client = LlmClient::new(api_key, config.transform_timeout)?;
                Arc::new(LlmTransformer(client))
            }
        };
        Ok(Self::new(provider, config.transform_timeout))
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Calls the provider once. Any failure is returned to the caller.
    pub async fn try_optimize(&self, raw: &str) -> Result<String, TransformError> {
        let text = tokio::time::timeout(self.timeout, self.provider.transform(raw))
            .await
            .map_err(|_| TransformError::Timeout(self.timeout))??;
        if text.trim().is_empty() {
            return Err(TransformError::EmptyOutput);
        }
        Ok(text)
    }

    /// Never fails: on timeout, provider error, or empty output the input is echoed.
    pub async fn optimize(&self, raw: &str) -> String {
        match self.try_optimize(raw).await {
            Ok(text) => {
                debug!(provider = self.provider.name(), "Summary transformed");
                text
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Text transform failed, returning original text"
                );
                raw.to_string()
            }
        }
    }
}
