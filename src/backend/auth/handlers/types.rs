/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the register, login and me handlers.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Body of POST /api/auth/register
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body of POST /api/auth/login
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Serialize, Debug)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

/// Public view of a user; never carries the password hash
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            email: user.email,
        }
    }
}
