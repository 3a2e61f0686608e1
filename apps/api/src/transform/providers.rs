//! Text transform backends.
//!
//! `EchoTransformer` is the default. `TemplateTransformer` is deterministic and
//! network-free. `LlmTransformer` rewrites through the Anthropic client.

use async_trait::async_trait;

use crate::llm_client::LlmClient;
use crate::transform::prompts::{summary_rewrite_prompt, summary_rewrite_system};
use crate::transform::{TextTransformer, TransformError};

/// Number of leading characters the template quotes back.
const TEMPLATE_PREFIX_CHARS: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// EchoTransformer
// ────────────────────────────────────────────────────────────────────────────

/// Returns its input unchanged.
pub struct EchoTransformer;

#[async_trait]
impl TextTransformer for EchoTransformer {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn transform(&self, raw: &str) -> Result<String, TransformError> {
        Ok(raw.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateTransformer
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the first few characters of the input in a fixed sentence.
pub struct TemplateTransformer;

#[async_trait]
impl TextTransformer for TemplateTransformer {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn transform(&self, raw: &str) -> Result<String, TransformError> {
        Ok(template_rewrite(raw))
    }
}

/// Counts characters, not bytes, so multi-byte input never splits mid-codepoint.
fn template_rewrite(raw: &str) -> String {
    let prefix: String = raw.trim().chars().take(TEMPLATE_PREFIX_CHARS).collect();
    format!("Results-oriented professional with expertise in {prefix}... [AI Optimized Version]")
}

// ────────────────────────────────────────────────────────────────────────────
// LlmTransformer
// ────────────────────────────────────────────────────────────────────────────

/// Rewrites the summary with Claude.
pub struct LlmTransformer(pub LlmClient);

#[async_trait]
impl TextTransformer for LlmTransformer {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn transform(&self, raw: &str) -> Result<String, TransformError> {
        let text = self
            .0
            .call_text(&summary_rewrite_prompt(raw), &summary_rewrite_system())
            .await?;
        Ok(text)
    }
}
