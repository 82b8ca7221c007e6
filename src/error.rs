//! Error handling module for Farmstead
//!
//! This module defines the error types used throughout the application,
//! providing a unified error handling strategy with proper error context
//! and HTTP response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for Farmstead operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Farmstead
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors for incoming payloads
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violations (duplicate username, duplicate tag_id)
    #[error("{0}")]
    Conflict(String),

    /// Credential mismatch on login
    #[error("{0}")]
    Auth(String),

    /// Unknown record identifier
    #[error("{0}")]
    NotFound(String),

    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(msg: S) -> Self {
        Error::Conflict(msg.into())
    }

    /// Create an authentication error
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        Error::Auth(msg.into())
    }

    /// Create a not-found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a database error
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Error::Database(msg.into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::Conflict(_) => StatusCode::BAD_REQUEST,
            Error::Auth(_) => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Config(_)
            | Error::Database(_)
            | Error::Serialization(_)
            | Error::Io(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Implement IntoResponse for automatic error responses in Axum
///
/// Every failure surfaces as `{"success": false, "message": "..."}` so the
/// web client can always read the message field.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = ?self, "Internal server error");
            },
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                tracing::warn!(error = ?self, "Client error");
            },
            _ => {
                tracing::info!(error = ?self, "Request error");
            },
        }

        (status, body).into_response()
    }
}

/// Get a string representation of the error type
pub fn error_type(error: &Error) -> &'static str {
    match error {
        Error::Config(_) => "configuration_error",
        Error::Validation(_) => "validation_error",
        Error::Conflict(_) => "conflict",
        Error::Auth(_) => "auth_error",
        Error::NotFound(_) => "not_found",
        Error::Database(_) => "database_error",
        Error::Serialization(_) => "serialization_error",
        Error::Io(_) => "io_error",
        Error::Internal(_) => "internal_error",
    }
}

/// Convert from anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

/// Convert from envconfig::Error to our Error type
impl From<envconfig::Error> for Error {
    fn from(err: envconfig::Error) -> Self {
        Error::Config(err.to_string())
    }
}
