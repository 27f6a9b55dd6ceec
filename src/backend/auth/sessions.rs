/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 * Tokens are HS256-signed with the configured secret and carry the user's
 * id, username and role so that route guards need no database round trip.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Tokens expire after 30 days
pub const TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub role: String,
    pub exp: u64,
    pub iat: u64,
}

/// Create a signed token for `user`
///
/// # Errors
///
/// Returns an error if the token cannot be encoded.
pub fn create_token(user: &User, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role.clone(),
        exp: (now + TOKEN_TTL_SECS).max(0) as u64,
        iat: now.max(0) as u64,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify a token's signature and expiry and return its claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::ROLE_ADMIN;

    const SECRET: &str = "test-secret";

    fn admin() -> User {
        User {
            id: 42,
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: String::new(),
            role: ROLE_ADMIN.to_string(),
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let token = create_token(&admin(), SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, ROLE_ADMIN);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS as u64);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token(&admin(), SECRET).unwrap();
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: "1".to_string(),
            username: "old".to_string(),
            role: "user".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token("not.a.token", SECRET).is_err());
    }
}
