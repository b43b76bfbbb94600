use super::*;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that mutate the process environment.
fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`env_guard`] so no other test touches the environment.
unsafe fn clear_llm_env() {
    unsafe {
        std::env::remove_var("LLM_API_KEY");
        std::env::remove_var("LLM_BASE_URL");
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LLM_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_applies_defaults() {
    let _env = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY", "secret");
        std::env::set_var("LLM_BASE_URL", "https://api.openai.com/v1");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.base_url, "https://api.openai.com/v1");
    assert_eq!(cfg.model, DEFAULT_LLM_MODEL);
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: None, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS });

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_parses_overrides() {
    let _env = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY", "sk-test");
        std::env::set_var("LLM_BASE_URL", "https://example.test/v1/");
        std::env::set_var("LLM_MODEL", "gpt-4o");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://example.test/v1");
    assert_eq!(cfg.model, "gpt-4o");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: Some(42), connect_secs: 7 });

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_missing_api_key_errors() {
    let _env = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_BASE_URL", "https://example.test/v1");
    }

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingConfig { ref var } if var == "LLM_API_KEY"));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_missing_base_url_errors() {
    let _env = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY", "secret");
    }

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingConfig { ref var } if var == "LLM_BASE_URL"));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_blank_api_key_counts_as_missing() {
    let _env = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY", "   ");
        std::env::set_var("LLM_BASE_URL", "https://example.test/v1");
    }

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingConfig { .. }));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_rejects_non_http_base_url() {
    let _env = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY", "secret");
        std::env::set_var("LLM_BASE_URL", "api.openai.com/v1");
    }

    let err = LlmConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("must be an http(s) URL"));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_ignores_unparseable_timeouts() {
    let _env = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY", "secret");
        std::env::set_var("LLM_BASE_URL", "http://localhost:11434/v1");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "soon");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "-1");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: None, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS });

    unsafe { clear_llm_env() };
}
