/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown user and wrong password give the same 401 response
 * - User passwords are never returned in responses
 */
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use bcrypt::verify;
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub async fn login(
    State(pool): State<Option<PgPool>>,
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::unavailable()
    })?;
    tracing::info!("Login request for: {}", request.username);

    let user = get_user_by_username(&pool, request.username.trim())
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.username);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_token(&user, &config.jwt_secret).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create token")
    })?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.role);

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}
