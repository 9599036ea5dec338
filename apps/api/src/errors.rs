use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::history::StoreError;
use crate::llm_client::LlmError;

/// Fallback for failures that carry no message of their own.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong while generating your notes. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("The document contains no readable text")]
    EmptyDocument,

    #[error("Could not extract text from the document: {0}")]
    Extraction(String),

    #[error("The AI returned notes we couldn't read. Try again with shorter or cleaner text.")]
    ResponseMalformed,

    #[error("{0}")]
    Transport(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A study pack is already being generated")]
    Busy,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The single user-visible string for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Transport(msg) if msg.trim().is_empty() => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            AppError::Storage(_) | AppError::Internal(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::EmptyDocument => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_DOCUMENT"),
            AppError::Extraction(_) => (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED"),
            AppError::ResponseMalformed => (StatusCode::BAD_GATEWAY, "RESPONSE_MALFORMED"),
            AppError::Transport(_) => (StatusCode::BAD_GATEWAY, "TRANSPORT_FAILURE"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Busy => (StatusCode::CONFLICT, "GENERATION_IN_PROGRESS"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::EmptyDocument => AppError::EmptyDocument,
            ExtractError::ExtractionFailed(msg) => AppError::Extraction(msg),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(_) | LlmError::EmptyContent => AppError::ResponseMalformed,
            LlmError::Http(e) => AppError::Transport(e.to_string()),
            LlmError::Api { message, .. } => AppError::Transport(message),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            AppError::Transport(msg) => tracing::error!("Transport error: {msg}"),
            AppError::Storage(msg) => tracing::error!("Storage error: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.user_message()
            }
        }));

        (status, body).into_response()
    }
}
