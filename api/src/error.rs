use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use wellcheck_core::error::{ApiError, codes};

/// Internal error type that converts to structured API responses
#[derive(Debug)]
pub enum AppError {
    /// Validation error (400)
    Validation {
        message: String,
        field: Option<String>,
        received: Option<serde_json::Value>,
        docs_hint: Option<String>,
    },
    /// Unknown resource (404)
    NotFound {
        message: String,
        received: Option<serde_json::Value>,
        docs_hint: Option<String>,
    },
    /// Internal error (500)
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::now_v7().to_string();
        let status = self.status();

        let api_error = match self {
            AppError::Validation {
                message,
                field,
                received,
                docs_hint,
            } => {
                tracing::debug!(%request_id, ?field, "Rejected request: {}", message);
                ApiError {
                    field,
                    received,
                    docs_hint,
                    ..ApiError::new(codes::VALIDATION_FAILED, message, request_id)
                }
            }
            AppError::NotFound {
                message,
                received,
                docs_hint,
            } => ApiError {
                received,
                docs_hint,
                ..ApiError::new(codes::NOT_FOUND, message, request_id)
            },
            AppError::Internal(msg) => {
                tracing::error!(%request_id, "Internal error: {}", msg);
                ApiError::new(codes::INTERNAL_ERROR, "An internal error occurred", request_id)
            }
        };

        (status, Json(api_error)).into_response()
    }
}

/// `CatchPanicLayer` handler: a panicking handler becomes a logged 500.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
