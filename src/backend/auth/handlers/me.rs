/**
 * Get Current User Handler
 *
 * GET /api/auth/me returns the user behind the bearer token. The token is
 * checked by the `AuthUser` extractor; the row is re-read so that a deleted
 * account answers 404 rather than echoing stale claims.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;

pub async fn get_me(
    State(pool): State<Option<PgPool>>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::unavailable()
    })?;

    let user = get_user_by_id(&pool, auth.user_id).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", auth.user_id);
        BackendError::not_found("User not found")
    })?;

    Ok(Json(user.into()))
}
