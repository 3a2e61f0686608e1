//! LLM Client: the single point of entry for Anthropic API calls.
//!
//! No other module may call the Anthropic API directly; the `anthropic` text transform
//! provider goes through here.
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 1024;
const MAX_RETRIES: u32 = 3;
/// Floor for a single HTTP attempt when the caller's budget is very small.
const MIN_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// What to do with an HTTP status from the Messages API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
    Success,
    /// Rate limit or server fault: try again after a backoff.
    Retry,
    /// Any other 4xx: the request itself is wrong, retrying cannot help.
    Fail,
}

fn classify_status(status: StatusCode) -> StatusClass {
    if status.is_success() {
        StatusClass::Success
    } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        StatusClass::Retry
    } else {
        StatusClass::Fail
    }
}

/// Pause before attempt `attempt` (1-based retries): 250ms, 500ms, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(250 * (1 << (attempt - 1)))
}

/// Per-attempt HTTP timeout such that all attempts plus their backoffs fit in `budget`.
fn attempt_timeout(budget: Duration) -> Duration {
    let backoff: Duration = (1..MAX_RETRIES).map(backoff_delay).sum();
    (budget.saturating_sub(backoff) / MAX_RETRIES).max(MIN_ATTEMPT_TIMEOUT)
}

/// Anthropic's `{"error":{"message":..}}` body, or the raw body when it is not that shape.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Outcome of one HTTP attempt.
enum Attempt {
    Done(LlmResponse),
    Retry(LlmError),
    Fail(LlmError),
}

/// Wraps the Anthropic Messages API with bounded per-attempt timeouts and retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    /// `budget` is the total time the caller allows for one `call`, retries included.
    pub fn new(api_key: String, budget: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(attempt_timeout(budget)).build()?,
            api_key,
        })
    }

    /// Makes a call to the Claude API, returning the full response object.
    /// Retries transport errors, 429 and 5xx with exponential backoff; fails fast on other 4xx.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error = None;
        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(attempt, delay_ms = delay.as_millis() as u64, "Retrying LLM call");
                tokio::time::sleep(delay).await;
            }

            match self.attempt(&request).await {
                Attempt::Done(response) => return Ok(response),
                Attempt::Retry(e) => last_error = Some(e),
                Attempt::Fail(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    async fn attempt(&self, request: &AnthropicRequest<'_>) -> Attempt {
        let sent = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await;
        let response = match sent {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(LlmError::Http(e)),
        };

        let status = response.status();
        match classify_status(status) {
            StatusClass::Success => match response.json::<LlmResponse>().await {
                Ok(body) => {
                    debug!(
                        input_tokens = body.usage.input_tokens,
                        output_tokens = body.usage.output_tokens,
                        "LLM call succeeded"
                    );
                    Attempt::Done(body)
                }
                Err(e) => Attempt::Fail(LlmError::Http(e)),
            },
            class => {
                let body = response.text().await.unwrap_or_default();
                let error = LlmError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                };
                if class == StatusClass::Retry {
                    warn!(%status, "LLM API returned a retryable status");
                    Attempt::Retry(error)
                } else {
                    Attempt::Fail(error)
                }
            }
        }
    }

    /// Calls the LLM and returns its plain-text answer with wrapping noise removed.
    pub async fn call_text(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        let text = strip_wrapping(text);
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

/// Strips ``` code fences and one pair of surrounding double quotes from LLM output.
fn strip_wrapping(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(stripped) = text.strip_prefix("```") {
        // Drop an optional language tag on the opening fence line.
        let body = stripped.split_once('\n').map_or(stripped, |(_, rest)| rest);
        text = body.trim_end().strip_suffix("```").unwrap_or(body).trim();
    }
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_wrapping_with_tagged_fence() {
        let input = "```text\nSeasoned engineer.\n```";
        assert_eq!(strip_wrapping(input), "Seasoned engineer.");
    }

    #[test]
    fn test_strip_wrapping_without_tag() {
        let input = "```\nSeasoned engineer.\n```";
        assert_eq!(strip_wrapping(input), "Seasoned engineer.");
    }

    #[test]
    fn test_strip_wrapping_quotes() {
        assert_eq!(strip_wrapping("  \"Seasoned engineer.\" "), "Seasoned engineer.");
    }

    #[test]
    fn test_strip_wrapping_plain_text_untouched() {
        assert_eq!(strip_wrapping("Seasoned \"go-to\" engineer."), "Seasoned \"go-to\" engineer.");
    }

    #[test]
    fn test_rate_limit_and_server_errors_are_retried() {
        assert_eq!(classify_status(StatusCode::TOO_MANY_REQUESTS), StatusClass::Retry);
        assert_eq!(classify_status(StatusCode::INTERNAL_SERVER_ERROR), StatusClass::Retry);
        assert_eq!(classify_status(StatusCode::SERVICE_UNAVAILABLE), StatusClass::Retry);
        // Anthropic's "overloaded" status.
        assert_eq!(classify_status(StatusCode::from_u16(529).unwrap()), StatusClass::Retry);
    }

    #[test]
    fn test_other_client_errors_fail_fast() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
        ] {
            assert_eq!(classify_status(status), StatusClass::Fail, "{status}");
        }
        assert_eq!(classify_status(StatusCode::OK), StatusClass::Success);
    }

    #[test]
    fn test_all_attempts_fit_in_the_caller_budget() {
        let budget = Duration::from_millis(8_000);
        let per_attempt = attempt_timeout(budget);
        let backoff: Duration = (1..MAX_RETRIES).map(backoff_delay).sum();
        assert_eq!(backoff, Duration::from_millis(750));
        assert!(per_attempt * MAX_RETRIES + backoff <= budget);
        assert!(per_attempt < budget);
    }

    #[test]
    fn test_tiny_budget_keeps_a_usable_attempt_timeout() {
        assert_eq!(attempt_timeout(Duration::from_millis(10)), MIN_ATTEMPT_TIMEOUT);
    }

    #[test]
    fn test_api_error_message_prefers_anthropic_shape() {
        let body = r#"{"type":"error","error":{"type":"invalid_request_error","message":"bad model"}}"#;
        assert_eq!(api_error_message(body.to_string()), "bad model");
        assert_eq!(api_error_message("gateway down".to_string()), "gateway down");
    }

    #[test]
    fn test_response_text_picks_first_text_block() {
        let response: LlmResponse = serde_json::from_str(
            r#"{"content":[{"type":"tool_use"},{"type":"text","text":"hi"}],
                "usage":{"input_tokens":1,"output_tokens":1}}"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("hi"));
    }
}
