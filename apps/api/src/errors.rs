use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// The single typed error every pipeline operation returns.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or blank caller input. Raised before any model call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Completion service unreachable or rejecting requests after transport retries.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Model output never parsed against the stage schema.
    #[error("{stage} returned malformed output after {attempts} attempts: {message}")]
    Schema {
        stage: &'static str,
        attempts: u32,
        message: String,
    },

    /// Model output parsed but kept breaking a documented contract.
    #[error("{stage} output violated its contract after {attempts} attempts: {message}")]
    Invariant {
        stage: &'static str,
        attempts: u32,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_UNAVAILABLE",
                    "The language model service is unavailable".to_string(),
                )
            }
            AppError::Schema { .. } => {
                tracing::error!("{self}");
                (StatusCode::BAD_GATEWAY, "SCHEMA_ERROR", self.to_string())
            }
            AppError::Invariant { .. } => {
                tracing::error!("{self}");
                (StatusCode::BAD_GATEWAY, "CONTRACT_VIOLATION", self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Rejects blank text before any model call is made.
pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
