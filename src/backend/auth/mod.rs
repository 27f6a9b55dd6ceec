//! Authentication Module
//!
//! This module handles user registration, login and JWT sessions.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: username and password → `user` account created → JWT returned
//! 2. **Login**: username and password → bcrypt check → JWT returned
//! 3. **Me**: bearer JWT → claims verified → user info returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens carry the user's role and expire after 30 days
//! - Invalid credentials return 401 without saying which part was wrong
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{routing::{get, post}, Router};
//! use reactshop::backend::auth::{get_me, login, register};
//! use reactshop::backend::server::AppState;
//!
//! let router: Router<AppState> = Router::new()
//!     .route("/api/auth/register", post(register))
//!     .route("/api/auth/login", post(login))
//!     .route("/api/auth/me", get(get_me));
//! ```

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use handlers::{get_me, login, register};
