//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::model::AudioFileType;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Outcomes of a storage operation other than success.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: AudioFileType, id: i32 },
    #[error("{kind} {id} already exists")]
    Conflict { kind: AudioFileType, id: i32 },
    /// Affected-row count of a primary-key update was neither 0 nor 1.
    #[error("{kind} {id} was not updated ({rows} rows affected)")]
    NotUpdated { kind: AudioFileType, id: i32, rows: u64 },
    /// Affected-row count of a primary-key delete was neither 0 nor 1.
    #[error("{kind} {id} was not deleted ({rows} rows affected)")]
    NotDeleted { kind: AudioFileType, id: i32, rows: u64 },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("not updated: {0}")]
    NotUpdated(String),
    #[error("not deleted: {0}")]
    NotDeleted(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        let message = e.to_string();
        match e {
            StoreError::NotFound { .. } => AppError::NotFound(message),
            StoreError::Conflict { .. } => AppError::Conflict(message),
            StoreError::NotUpdated { .. } => AppError::NotUpdated(message),
            StoreError::NotDeleted { .. } => AppError::NotDeleted(message),
            StoreError::Db(e) => AppError::Db(e),
        }
    }
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            // Duplicate ids answer 400, not 409.
            AppError::Conflict(_) => (StatusCode::BAD_REQUEST, "conflict"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::NotUpdated(_) => (StatusCode::INTERNAL_SERVER_ERROR, "not_updated"),
            AppError::NotDeleted(_) => (StatusCode::INTERNAL_SERVER_ERROR, "not_deleted"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_http_statuses() {
        let cases = [
            (
                StoreError::NotFound { kind: AudioFileType::Song, id: 1 },
                StatusCode::NOT_FOUND,
            ),
            (
                StoreError::Conflict { kind: AudioFileType::Podcast, id: 2 },
                StatusCode::BAD_REQUEST,
            ),
            (
                StoreError::NotUpdated { kind: AudioFileType::Audiobook, id: 3, rows: 2 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::NotDeleted { kind: AudioFileType::Song, id: 4, rows: 2 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let app: AppError = err.into();
            assert_eq!(app.status_and_code().0, status);
        }
    }

    #[test]
    fn messages_name_the_record() {
        let app: AppError = StoreError::NotFound { kind: AudioFileType::Podcast, id: 7 }.into();
        assert_eq!(app.to_string(), "not found: podcast 7 not found");
        assert_eq!(app.status_and_code().1, "not_found");
    }

    #[test]
    fn oversized_body_keeps_its_status() {
        let app = AppError::PayloadTooLarge("length limit exceeded".into());
        assert_eq!(app.status_and_code(), (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"));
    }

    #[test]
    fn validation_is_unprocessable() {
        let app = AppError::Validation("name is required".into());
        assert_eq!(app.status_and_code(), (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"));
    }
}
