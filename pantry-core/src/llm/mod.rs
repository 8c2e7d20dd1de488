//! LLM provider abstraction used to generate recipes when the catalog has
//! nothing to offer.
//!
//! Providers are chosen through [`LlmConfig`]; tests use [`FakeProvider`].

mod claude;
mod config;
mod fake;

pub use claude::ClaudeProvider;
pub use config::{ConfigError, LlmConfig, ProviderKind, DEFAULT_CLAUDE_MODEL, DEFAULT_TIMEOUT_SECS};
pub use fake::FakeProvider;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for LLM providers.
///
/// Implementations should be stateless and thread-safe. The provider is responsible
/// for making API calls and returning the model's text response.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt to the LLM and get a text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "claude", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "claude-3-5-sonnet-20241022").
    fn model_name(&self) -> &str;
}

/// Build the provider described by `config`.
///
/// Fails with [`LlmError::NotConfigured`] when the selected provider needs a
/// credential that was not supplied.
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    match config.provider {
        ProviderKind::Fake => Ok(Box::new(FakeProvider::with_sample_recipes())),
        ProviderKind::Claude => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| LlmError::NotConfigured("ANTHROPIC_API_KEY not set".to_string()))?;
            let provider = ClaudeProvider::new(api_key, config.model.clone(), config.timeout)?;
            Ok(Box::new(provider))
        }
    }
}
