//! The uniform error body returned by every failing request.
//!
//! The API exposes exactly one error shape: `{ "message": <string> }`,
//! paired with whatever status the caller supplies. Keeping the struct here
//! lets the middleware, extractors, and domain error types all render the
//! same body without depending on each other.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Standard error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Render as a full response with the given status.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
