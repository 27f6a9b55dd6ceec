/**
 * Registration Handler
 *
 * POST /api/auth/register creates a `user`-role account and signs the caller
 * in straight away.
 *
 * # Validation
 *
 * - Username and password must both be non-blank (400)
 * - Username must not be taken (400)
 *
 * The email is derived from the username (`<username>@example.com`); the
 * storefront never asks for one.
 */
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_username, ROLE_USER};
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

const USERNAME_TAKEN: &str = "Username already taken";

pub async fn register(
    State(pool): State<Option<PgPool>>,
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), BackendError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::unavailable()
    })?;

    let username = request.username.trim();
    if username.is_empty() || request.password.trim().is_empty() {
        return Err(BackendError::bad_request("Username and password are required"));
    }

    tracing::info!("Registration request for: {}", username);

    if get_user_by_username(&pool, username).await?.is_some() {
        tracing::warn!("Username already exists: {}", username);
        return Err(BackendError::bad_request(USERNAME_TAKEN));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)?;
    let email = format!("{}@example.com", username);

    let user = create_user(&pool, username, &email, &password_hash, ROLE_USER)
        .await
        .map_err(|e| match &e {
            // Lost a race with a concurrent registration
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                BackendError::bad_request(USERNAME_TAKEN)
            }
            _ => BackendError::from(e),
        })?;

    let token = create_token(&user, &config.jwt_secret).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create token")
    })?;

    tracing::info!("User registered: {} (id {})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
            user: user.into(),
            token,
        }),
    ))
}
