//! Error type for the HTTP façade
//!
//! Simulation outcomes (unreachable exit, invalid step, last problem) are
//! reported as state, not as errors. Only request-level failures end up here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application error with an HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No frame has been published yet (503)
    #[error("No frame rendered yet")]
    FrameUnavailable,

    /// Unknown route (404)
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::FrameUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = axum::Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// Result alias for handlers
pub type AppResult<T> = Result<T, AppError>;
