use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

const DEFAULT_TRANSFORM_TIMEOUT_MS: u64 = 8_000;

/// Which `TextTransformer` backs `/api/optimize-summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformProvider {
    /// Returns the input unchanged. Default when nothing is configured.
    Echo,
    /// Deterministic templated rewrite, no network.
    Template,
    /// Anthropic Messages API. Requires `ANTHROPIC_API_KEY`.
    Anthropic,
}

impl FromStr for TransformProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "echo" => Ok(TransformProvider::Echo),
            "template" => Ok(TransformProvider::Template),
            "anthropic" => Ok(TransformProvider::Anthropic),
            other => Err(anyhow!(
                "unknown text transform provider '{other}' (expected echo, template or anthropic)"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub transform_provider: TransformProvider,
    pub anthropic_api_key: Option<String>,
    pub transform_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let transform_provider = match lookup("TEXT_TRANSFORM_PROVIDER") {
            Some(value) => value
                .parse::<TransformProvider>()
                .context("TEXT_TRANSFORM_PROVIDER is invalid")?,
            None => TransformProvider::Echo,
        };

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        if transform_provider == TransformProvider::Anthropic && anthropic_api_key.is_none() {
            bail!("Required environment variable 'ANTHROPIC_API_KEY' is not set");
        }

        let timeout_ms = match lookup("TRANSFORM_TIMEOUT_MS") {
            Some(value) => value
                .parse::<u64>()
                .context("TRANSFORM_TIMEOUT_MS must be a whole number of milliseconds")?,
            None => DEFAULT_TRANSFORM_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            bail!("TRANSFORM_TIMEOUT_MS must be greater than zero");
        }

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            transform_provider,
            anthropic_api_key,
            transform_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.transform_provider, TransformProvider::Echo);
        assert_eq!(config.transform_timeout, Duration::from_millis(8_000));
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn test_provider_parsing_is_case_insensitive() {
        let config = config_from(&[("TEXT_TRANSFORM_PROVIDER", "Template")]).unwrap();
        assert_eq!(config.transform_provider, TransformProvider::Template);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        assert!(config_from(&[("TEXT_TRANSFORM_PROVIDER", "gpt")]).is_err());
    }

    #[test]
    fn test_anthropic_requires_api_key() {
        assert!(config_from(&[("TEXT_TRANSFORM_PROVIDER", "anthropic")]).is_err());
        let config = config_from(&[
            ("TEXT_TRANSFORM_PROVIDER", "anthropic"),
            ("ANTHROPIC_API_KEY", "sk-test"),
        ])
        .unwrap();
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_invalid_port_and_timeout_are_rejected() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("TRANSFORM_TIMEOUT_MS", "0")]).is_err());
        assert!(config_from(&[("TRANSFORM_TIMEOUT_MS", "soon")]).is_err());
    }
}
