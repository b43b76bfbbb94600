//! Stable error codes shared by the service and HTTP layers.
//!
//! DESIGN
//! ======
//! Every error enum exposes an `E_*` code through [`ErrorCode`]. The JSON API
//! renders failures as `{ "code", "message" }` so callers can branch on the
//! code instead of parsing display text.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Classify an error with a stable, machine-readable code.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// JSON body returned for every API error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ErrorBody {
    #[must_use]
    pub fn from_error(err: &impl ErrorCode) -> Self {
        Self { code: err.error_code(), message: err.to_string() }
    }
}

/// Build an API error response with the given status.
pub fn error_response(status: StatusCode, err: &impl ErrorCode) -> Response {
    (status, Json(ErrorBody::from_error(err))).into_response()
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
