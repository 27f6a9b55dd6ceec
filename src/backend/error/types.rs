/**
 * Backend Error Types
 *
 * This module defines the error type returned by the REST handlers. Every
 * variant maps to an HTTP status and a client-facing message.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised by handlers directly with an explicit status:
 * - Missing or invalid credentials (401)
 * - Non-admin access to admin routes (403)
 * - Unknown product (404)
 * - No database configured (503)
 *
 * ## Infrastructure Errors
 *
 * Database and password-hashing failures surface as 500. Their details are
 * logged, never sent to the client.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Database driver error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Validation or serialization error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Password hashing or verification failed
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// The route needs a database and none is configured
    pub fn unavailable() -> Self {
        Self::handler(StatusCode::SERVICE_UNAVAILABLE, "Database not configured")
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `DatabaseError` - 500 Internal Server Error
    /// - `SharedError` - 400 for validation, 500 for serialization
    /// - `PasswordHash` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::MessageError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::DatabaseError(_) => "Internal server error".to_string(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::PasswordHash(_) => "Internal server error".to_string(),
        }
    }
}
