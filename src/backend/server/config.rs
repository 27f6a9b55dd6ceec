/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration from
 * environment variables (a `.env` file is loaded by the binary first).
 *
 * # Variables
 *
 * | Variable             | Default                 |
 * |----------------------|-------------------------|
 * | `SERVER_PORT`        | `5000`                  |
 * | `DATABASE_URL`       | unset, database disabled |
 * | `JWT_SECRET`         | development secret      |
 * | `CHAT_HISTORY_LIMIT` | `50`                    |
 * | `CHAT_MAX_PAYLOAD_BYTES` | `16384`             |
 *
 * # Error Handling
 *
 * Malformed numeric values are a `ConfigError`. A missing or unreachable
 * database is not: the server starts without it and database-backed routes
 * answer 503.
 */

use sqlx::PgPool;
use thiserror::Error;

use crate::backend::chat::codec::DEFAULT_MAX_PAYLOAD_BYTES;
use crate::backend::chat::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_PORT: u16 = 5000;

const DEV_JWT_SECRET: &str = "reactshop-dev-secret-change-me";

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub chat_history_limit: usize,
    /// Largest inbound chat frame accepted, in bytes
    pub chat_max_payload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            chat_history_limit: DEFAULT_HISTORY_LIMIT,
            chat_max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `SERVER_PORT`,
    /// `CHAT_HISTORY_LIMIT` or `CHAT_MAX_PAYLOAD_BYTES` is not a valid number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, one variable name at a time
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match value("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "SERVER_PORT",
                expected: "a port number",
                value: raw,
            })?,
            None => defaults.port,
        };

        let chat_history_limit = match value("CHAT_HISTORY_LIMIT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "CHAT_HISTORY_LIMIT",
                expected: "a non-negative integer",
                value: raw,
            })?,
            None => defaults.chat_history_limit,
        };

        let chat_max_payload_bytes = match value("CHAT_MAX_PAYLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|bytes: &usize| *bytes > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "CHAT_MAX_PAYLOAD_BYTES",
                    expected: "a positive integer",
                    value: raw,
                })?,
            None => defaults.chat_max_payload_bytes,
        };

        let jwt_secret = value("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set. Using the development secret.");
            defaults.jwt_secret
        });

        Ok(Self {
            port,
            database_url: value("DATABASE_URL"),
            jwt_secret,
            chat_history_limit,
            chat_max_payload_bytes,
        })
    }
}

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is connected
/// - `None` if no URL is configured or the connection fails
///
/// # Errors
///
/// Errors are logged but do not prevent server startup.
pub async fn load_database(database_url: Option<&str>) -> DatabaseConfig {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
