//! Error types for the forms API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docx_engine::EngineError;
use forms_core::FormError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Alicuota not found: {0}")]
    AlicuotaNotFound(i64),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Document generation failed: {0}")]
    Engine(EngineError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::TemplateNotFound(name) => ApiError::TemplateNotFound(name),
            other => ApiError::Engine(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Form(_) | ApiError::MissingFields(_) | ApiError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::TemplateNotFound(_)
            | ApiError::AlicuotaNotFound(_)
            | ApiError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Engine(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Engine(e) => {
                tracing::error!("Engine error: {}", e);
                "Document generation failed".to_string()
            }
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
