//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    /// Whole-request timeout. `None` leaves the request unbounded.
    pub request_secs: Option<u64>,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Required:
    /// - `LLM_API_KEY`: bearer credential for the chat-completions endpoint
    /// - `LLM_BASE_URL`: OpenAI-compatible API base (e.g. `https://api.openai.com/v1`)
    ///
    /// Optional:
    /// - `LLM_MODEL`: default `gpt-4o-mini`
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    /// - `LLM_REQUEST_TIMEOUT_SECS`: unset means no request timeout
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingConfig`] when a required variable is unset
    /// or blank, and [`LlmError::ConfigParse`] when the base URL is not HTTP(S).
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = required_env("LLM_API_KEY")?;
        let base_url = parse_base_url(&required_env("LLM_BASE_URL")?)?;
        let model = std::env::var("LLM_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());
        let timeouts = LlmTimeouts {
            request_secs: std::env::var("LLM_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok()),
            connect_secs: env_parse_u64("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, base_url, model, timeouts })
    }
}

fn required_env(key: &str) -> Result<String, LlmError> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LlmError::MissingConfig { var: key.into() })
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_base_url(raw: &str) -> Result<String, LlmError> {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(LlmError::ConfigParse(format!("LLM_BASE_URL must be an http(s) URL, got '{raw}'")));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
