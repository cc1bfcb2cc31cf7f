//! Unified error types for the student records service.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;
use thiserror::Error;

/// Unified error type for startup and command-line operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage adapter errors.
///
/// A missing record is never an error; operations that can miss return
/// `Option` or `bool` instead.
#[derive(Error, Debug)]
pub enum StoreError {
    /// MongoDB driver error (connectivity, server rejection).
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    /// A stored document could not be mapped to a student.
    #[error("malformed document: {0}")]
    Document(String),

    /// Backend is unavailable.
    #[error("{0}")]
    Unavailable(String),
}

/// Error returned by HTTP handlers.
///
/// Each variant fixes its status code. The message of a failure is passed
/// through to the client verbatim.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No student with the requested id.
    #[error("Student not found")]
    NotFound,

    /// A read or delete failed for a reason other than absence (500).
    #[error("{0}")]
    ReadFailed(String),

    /// A create or update failed, including malformed payloads (400).
    #[error("{0}")]
    WriteFailed(String),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ReadFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::WriteFailed(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Map a storage error from a read or delete.
    pub fn read(err: StoreError) -> Self {
        ApiError::ReadFailed(err.to_string())
    }

    /// Map a storage error from a create or update.
    pub fn write(err: StoreError) -> Self {
        ApiError::WriteFailed(err.to_string())
    }
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
