//! LLM: chat-completions adapter used by the tutorial generator.
//!
//! DESIGN
//! ======
//! Configuration comes from environment variables ([`config::LlmConfig`]).
//! `LlmClient` wraps the OpenAI-compatible client and implements the
//! [`LlmChat`] trait so services can be exercised against a mock.

pub mod config;
pub mod openai;
pub mod types;

use config::LlmConfig;
pub use types::LlmChat;
use types::{ChatParams, ChatResponse, LlmError, Message};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client bound to one endpoint and model.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: openai::OpenAiClient,
    model: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential or base URL is missing, or the HTTP
    /// client fails to build.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }

    /// Return the configured model name (e.g. `"gpt-4o-mini"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, params: ChatParams, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.inner
            .chat(&self.model, params, system, messages)
            .await
    }
}
