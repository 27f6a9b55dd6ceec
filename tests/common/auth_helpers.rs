//! Authentication test helpers
//!
//! Provides a fixed test configuration and tokens signed with its secret.

use reactshop::backend::auth::sessions::create_token;
use reactshop::backend::auth::users::{User, ROLE_ADMIN, ROLE_USER};
use reactshop::backend::server::ServerConfig;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Server configuration with a known JWT secret and no database
pub fn test_config() -> ServerConfig {
    ServerConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..ServerConfig::default()
    }
}

/// Token for a user that does not need to exist in any database
pub fn token_for(id: i64, username: &str, role: &str) -> String {
    let user = User {
        id,
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: String::new(),
        role: role.to_string(),
    };
    create_token(&user, TEST_JWT_SECRET).expect("Failed to create test token")
}

pub fn admin_token() -> String {
    token_for(1, "admin", ROLE_ADMIN)
}

pub fn user_token() -> String {
    token_for(2, "user", ROLE_USER)
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
