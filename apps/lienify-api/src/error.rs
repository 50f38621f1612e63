//! Error types for Lienify API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use waiver_engine::EngineError;
use waiver_types::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("No document has been generated for this session")]
    DocumentNotReady,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid template selection: {0}")]
    InvalidSelection(String),

    #[error("Template unavailable: {0}")]
    TemplateUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidSelection(msg) => ApiError::InvalidSelection(msg),
            EngineError::Validation(e) => ApiError::Validation(e),
            EngineError::TemplateNotFound(_) | EngineError::Io(_) => {
                ApiError::TemplateUnavailable(err.to_string())
            }
            EngineError::DocumentParse(_) | EngineError::Serialization(_) => {
                ApiError::Internal(err.into())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::SessionNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Session not found: {}", id))
            }
            ApiError::DocumentNotReady => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::InvalidSelection(msg) => {
                tracing::error!("Invalid template selection: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    format!("Invalid template selection: {}", msg),
                )
            }
            ApiError::TemplateUnavailable(msg) => {
                tracing::error!("Template unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "template unavailable".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
