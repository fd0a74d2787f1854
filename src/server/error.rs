use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::responses::ErrorBody;

/// Failures that end a delivery inside the request, before any side effect
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid JSON")]
    InvalidJson,
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::InvalidJson => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
