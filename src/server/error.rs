//! API error type and its HTTP mapping.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::llm::LlmError;
use crate::ocr::ExtractionError;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is unacceptable (wrong file type, missing field).
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl ApiError {
    /// Status code and client-facing message. Internal details stay in the log.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Multipart(e) => (e.status(), e.body_text()),
            ApiError::Extraction(ExtractionError::Timeout(_)) => (
                StatusCode::GATEWAY_TIMEOUT,
                "PDF extraction timed out".to_string(),
            ),
            ApiError::Extraction(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PDF extraction failed".to_string(),
            ),
            ApiError::Llm(LlmError::Timeout(_)) => (
                StatusCode::GATEWAY_TIMEOUT,
                "LLM request timed out".to_string(),
            ),
            ApiError::Llm(_) => (StatusCode::BAD_GATEWAY, "LLM analysis failed".to_string()),
            ApiError::Staging(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (
            status,
            Json(ErrorBody {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
