//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Error conversion implementations (IntoResponse, etc.)
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Types
//!
//! - `HandlerError` - Errors raised by HTTP handlers with an explicit status
//! - `DatabaseError` - sqlx failures, reported to clients as 500
//! - `SharedError` - Validation errors from the shared module
//! - `PasswordHash` - bcrypt failures
//!
//! # HTTP Response Conversion
//!
//! All backend errors implement `IntoResponse` from Axum, allowing them to be
//! returned directly from handlers as a JSON body with `error` and `status`.
//!
//! # Example
//!
//! ```rust,no_run
//! use reactshop::backend::error::BackendError;
//!
//! fn lookup(found: bool) -> Result<(), BackendError> {
//!     if !found {
//!         return Err(BackendError::not_found("Product not found"));
//!     }
//!     Ok(())
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;

