use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::repositories::RepositoryError;

pub type AppResult<T> = Result<T, AppError>;

/// Validation messages keyed by the offending field name.
pub type FieldErrors = BTreeMap<&'static str, Vec<&'static str>>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid student data")]
    Validation(FieldErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Storage(String),
}

impl AppError {
    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Maps a repository failure, logging the driver error and replacing it
    /// with `fallback` so nothing from the database reaches the client.
    pub fn from_repository(err: RepositoryError, fallback: &str) -> Self {
        match err {
            RepositoryError::UniqueViolation => {
                Self::conflict("A student with this email already exists.")
            }
            RepositoryError::Sqlx(err) => {
                error!(error = %err, "{fallback}");
                Self::storage(fallback)
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::Validation(errors) => ErrorMessage::Fields(errors),
            other => ErrorMessage::Text(other.to_string()),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: ErrorMessage,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorMessage {
    Text(String),
    Fields(FieldErrors),
}
