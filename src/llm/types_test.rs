use super::*;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_config_parse() {
    let err = LlmError::ConfigParse("bad".into());
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
}

#[test]
fn error_code_missing_config() {
    let err = LlmError::MissingConfig { var: "LLM_API_KEY".into() };
    assert_eq!(err.error_code(), "E_MISSING_CONFIG");
    assert!(err.to_string().contains("LLM_API_KEY"));
}

#[test]
fn error_code_api_response() {
    let err = LlmError::ApiResponse { status: 500, body: "oops".into() };
    assert_eq!(err.error_code(), "E_API_RESPONSE");
}

#[test]
fn error_code_http_client_build() {
    let err = LlmError::HttpClientBuild("tls".into());
    assert_eq!(err.error_code(), "E_HTTP_CLIENT_BUILD");
}

// =============================================================================
// LlmError::retryable / is_rate_limited
// =============================================================================

#[test]
fn retryable_api_response_429() {
    let err = LlmError::ApiResponse { status: 429, body: "rate limited".into() };
    assert!(err.retryable());
    assert!(err.is_rate_limited());
}

#[test]
fn retryable_api_response_503_not_rate_limited() {
    let err = LlmError::ApiResponse { status: 503, body: String::new() };
    assert!(err.retryable());
    assert!(!err.is_rate_limited());
}

#[test]
fn not_retryable_api_parse() {
    let err = LlmError::ApiParse("json".into());
    assert!(!err.retryable());
    assert!(!err.is_rate_limited());
}

// =============================================================================
// LlmError::provider_message
// =============================================================================

#[test]
fn provider_message_reads_openai_error_body() {
    let body = serde_json::json!({
        "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
    })
    .to_string();
    let err = LlmError::ApiResponse { status: 401, body };
    assert_eq!(err.provider_message(), "Incorrect API key provided");
}

#[test]
fn provider_message_accepts_string_error() {
    let body = serde_json::json!({ "error": "model overloaded" }).to_string();
    let err = LlmError::ApiResponse { status: 503, body };
    assert_eq!(err.provider_message(), "model overloaded");
}

#[test]
fn provider_message_falls_back_to_status() {
    let err = LlmError::ApiResponse { status: 502, body: "<html>bad gateway</html>".into() };
    assert_eq!(err.provider_message(), "request failed with status 502");
}

#[test]
fn provider_message_passes_through_request_errors() {
    let err = LlmError::ApiRequest("connection refused".into());
    assert_eq!(err.provider_message(), "API request failed: connection refused");
}

// =============================================================================
// Message
// =============================================================================

#[test]
fn message_user_sets_role() {
    let msg = Message::user("hello");
    assert_eq!(msg.role, "user");
    assert_eq!(msg.content, "hello");
}
