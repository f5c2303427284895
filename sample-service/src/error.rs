//! Request validation errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use standard_response::response::ErrorPayload;
use thiserror::Error;

/// Rejected request parameters
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ApiError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejected request");
        let body = ErrorPayload::new("INVALID_PARAMETER", self.to_string());
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}
