use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::db::StorageError;
use crate::validation::ValidationError;

const FIELD_ERROR: &str = "Une erreur existe dans un de champs.";
const STORAGE_ERROR: &str = "Une erreur innattendue est survenue.";

#[derive(Debug)]
pub enum AppError {
    /// Missing, empty or out-of-range request field. Carries the description.
    Validation(String),
    NotFound(String),
    Storage(StorageError),
    Unexpected(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Storage(err) => write!(f, "Storage: {err}"),
            AppError::Unexpected(msg) => write!(f, "Unexpected: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(description) => {
                tracing::warn!("Validation error: {description}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "erreur": FIELD_ERROR, "description": description }),
                )
            }
            AppError::NotFound(msg) => {
                tracing::warn!("Not found: {msg}");
                (StatusCode::NOT_FOUND, json!({ "erreur": msg }))
            }
            AppError::Storage(err) => {
                tracing::error!("Storage error: {}", err.sanitized());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "erreur": STORAGE_ERROR }),
                )
            }
            AppError::Unexpected(msg) => {
                tracing::error!("Unexpected error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "erreur": msg }))
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
