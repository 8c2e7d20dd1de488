//! Generator configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default Claude model.
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Default bound on a single generation request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

/// Which backend generates recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Claude,
    Fake,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "anthropic" => Ok(ProviderKind::Claude),
            "fake" => Ok(ProviderKind::Fake),
            other => Err(other.to_string()),
        }
    }
}

/// Generator configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    /// Anthropic API key. Absent means the generator is unavailable.
    pub api_key: Option<String>,
    pub model: String,
    /// Upper bound on one external call.
    pub timeout: Duration,
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `PANTRY_LLM_PROVIDER`: "claude" or "fake" (default: "claude")
    /// - `ANTHROPIC_API_KEY`: API key for Claude
    /// - `PANTRY_LLM_MODEL`: Model name (default: [`DEFAULT_CLAUDE_MODEL`])
    /// - `PANTRY_LLM_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    ///
    /// A missing API key is not an error here; it surfaces when a search
    /// actually needs the generator.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match env::var("PANTRY_LLM_PROVIDER") {
            Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "PANTRY_LLM_PROVIDER".to_string(),
                value,
            })?,
            Err(_) => ProviderKind::Claude,
        };

        let api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let model =
            env::var("PANTRY_LLM_MODEL").unwrap_or_else(|_| DEFAULT_CLAUDE_MODEL.to_string());

        let timeout_secs = match env::var("PANTRY_LLM_TIMEOUT_SECS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: "PANTRY_LLM_TIMEOUT_SECS".to_string(),
                    value,
                })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            provider,
            api_key,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
