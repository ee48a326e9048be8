use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gdocs::DocsError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant maps to a 500 with the upstream message in the body; the
/// front-end branches on `success` and shows `error` as-is.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Document publish error: {0}")]
    Docs(#[from] DocsError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Llm(e) => {
                tracing::error!("Error generating plan: {e}");
                e.to_string()
            }
            AppError::Docs(e) => {
                tracing::error!("Error creating document: {e}");
                e.to_string()
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
