/**
 * Authentication Extractors
 *
 * Route guards for protected endpoints. Both extractors read the
 * `Authorization: Bearer <token>` header and verify the JWT against the
 * configured secret.
 *
 * - `AuthUser` - any valid token, otherwise 401
 * - `AdminUser` - valid token with role `admin`, otherwise 401 / 403
 *
 * ```rust,no_run
 * use reactshop::backend::middleware::auth::AdminUser;
 *
 * async fn admin_only(AdminUser(user): AdminUser) -> String {
 *     format!("hello {}", user.username)
 * }
 * ```
 */

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::ROLE_ADMIN;
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

/// Caller identified by a valid bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Caller with the admin role
#[derive(Clone, Debug)]
pub struct AdminUser(pub AuthUser);

/// Pull the token out of an `Authorization` header value
fn bearer_token(parts: &Parts) -> Result<&str, BackendError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Missing authorization token")
        })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized("Invalid authorization header")
    })
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<ServerConfig>: FromRef<S>,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<ServerConfig>::from_ref(state);
        let token = bearer_token(parts)?;

        let claims = verify_token(token, &config.jwt_secret).map_err(|e| {
            tracing::warn!("Invalid token: {}", e);
            BackendError::unauthorized("Invalid or expired token")
        })?;

        let user_id = claims.sub.parse::<i64>().map_err(|e| {
            tracing::warn!("Invalid user ID in token: {}", e);
            BackendError::unauthorized("Invalid or expired token")
        })?;

        Ok(Self {
            user_id,
            username: claims.username,
            role: claims.role,
        })
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<ServerConfig>: FromRef<S>,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!("Non-admin {} attempted an admin action", user.username);
            return Err(BackendError::forbidden("Admins only"));
        }
        Ok(Self(user))
    }
}
