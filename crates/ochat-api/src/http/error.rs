//! Application error type mapping to HTTP status codes and `{"error": ...}` bodies.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use ochat_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the conversation service or chat orchestrator.
    Chat(ChatError),
    /// Malformed or missing request body.
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                AppError::Validation("No data provided".to_string())
            }
            other => AppError::Validation(other.body_text()),
        }
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Chat(ChatError::InvalidRequest(msg)) | AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Chat(ChatError::NotFound) => {
                (StatusCode::NOT_FOUND, "Conversation not found".to_string())
            }
            AppError::Chat(e @ ChatError::BackendUnavailable(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::Chat(e @ ChatError::Persistence(_)) => {
                tracing::error!(error = %e, "Request failed on the conversation store");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
