//! Generation client: topic in, tutorial markdown out.
//!
//! DESIGN
//! ======
//! One chat-completion request per call: a fixed tutorial-writer system
//! prompt, a fixed user prompt with the topic interpolated, bounded output
//! length and a fixed temperature. The first choice's text is the tutorial.
//! No retry and no streaming; a failure is returned to the caller once.
//!
//! An empty response is a failure ([`GenerationError::EmptyContent`]) so the
//! record always ends with either real content or an error message.

use std::sync::OnceLock;

use tracing::info;

use crate::error::ErrorCode;
use crate::llm::LlmChat;
use crate::llm::types::{ChatParams, LlmError, Message};

const DEFAULT_TUTORIAL_MAX_TOKENS: u32 = 2000;
const DEFAULT_TUTORIAL_TEMPERATURE: f64 = 0.7;

pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";
pub const EMPTY_CONTENT_MESSAGE: &str = "No content was generated. Please try again.";

const SYSTEM_PROMPT: &str =
    "You are an expert technical writer who creates clear, concise, and comprehensive tutorials.";

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn tutorial_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| env_parse("TUTORIAL_MAX_TOKENS", DEFAULT_TUTORIAL_MAX_TOKENS))
}

fn tutorial_temperature() -> f64 {
    static VALUE: OnceLock<f64> = OnceLock::new();
    *VALUE.get_or_init(|| env_parse("TUTORIAL_TEMPERATURE", DEFAULT_TUTORIAL_TEMPERATURE))
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("topic must not be empty")]
    EmptyTopic,
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("{0}")]
    Remote(String),
    #[error("No content was generated. Please try again.")]
    EmptyContent,
}

impl ErrorCode for GenerationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTopic => "E_EMPTY_TOPIC",
            Self::RateLimited => "E_RATE_LIMITED",
            Self::Remote(_) => "E_GENERATION_FAILED",
            Self::EmptyContent => "E_EMPTY_CONTENT",
        }
    }

    fn retryable(&self) -> bool {
        !matches!(self, Self::EmptyTopic)
    }
}

impl From<LlmError> for GenerationError {
    fn from(e: LlmError) -> Self {
        if e.is_rate_limited() { Self::RateLimited } else { Self::Remote(e.provider_message()) }
    }
}

// =============================================================================
// PROMPTS
// =============================================================================

/// Fixed instructional prompt with `topic` embedded.
#[must_use]
pub fn build_user_prompt(topic: &str) -> String {
    format!(
        "Your task is to generate a nice in-depth tutorial based on the input provided. \
         Use simple language and provide the article in markdown format.\n\n\
         Topic: {topic}\n\n\
         Please create a comprehensive tutorial that includes:\n\
         1. Introduction\n\
         2. Prerequisites (if any)\n\
         3. Step-by-step instructions\n\
         4. Code examples (if applicable)\n\
         5. Best practices\n\
         6. Common pitfalls\n\
         7. Conclusion"
    )
}

#[must_use]
pub fn chat_params() -> ChatParams {
    ChatParams { max_tokens: tutorial_max_tokens(), temperature: tutorial_temperature() }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Generate tutorial markdown for `topic` with a single chat request.
///
/// # Errors
///
/// Returns [`GenerationError::RateLimited`] when the provider rate-limits the
/// call, [`GenerationError::Remote`] with the provider's message for any other
/// failure, and [`GenerationError::EmptyContent`] when no text comes back.
pub async fn generate_tutorial(llm: &dyn LlmChat, topic: &str) -> Result<String, GenerationError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(GenerationError::EmptyTopic);
    }

    let messages = [Message::user(build_user_prompt(topic))];
    let response = llm
        .chat(chat_params(), SYSTEM_PROMPT, &messages)
        .await?;

    info!(
        model = %response.model,
        stop_reason = %response.stop_reason,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "generation: LLM response"
    );

    match response.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(GenerationError::EmptyContent),
    }
}

#[cfg(test)]
#[path = "generation_test.rs"]
mod tests;
