/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - Server configuration (JWT secret, chat limits)
 * - Optional PostgreSQL pool
 * - The chat handler (registry, message store, codec)
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use sqlx::PgPool;
 *
 * async fn handler(State(pool): State<Option<PgPool>>) {
 *     // `None` when no database is configured
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::chat::{
    ChatHandler, JsonCodec, MemoryMessageStore, MessageStore, PgMessageStore,
};
use crate::backend::server::config::ServerConfig;

/// Application state shared by every route
///
/// # Fields
///
/// * `config` - Server configuration
/// * `db_pool` - Optional PostgreSQL database connection pool
/// * `chat` - Chat core used by the WebSocket route
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,

    /// `None` if `DATABASE_URL` is not set or the connection failed.
    /// Handlers should check for `None` before using the database.
    pub db_pool: Option<PgPool>,

    pub chat: ChatHandler,
}

impl AppState {
    /// Build state around an optional pool
    ///
    /// Chat messages are stored in PostgreSQL when a pool is present and in
    /// memory otherwise.
    pub fn new(config: ServerConfig, db_pool: Option<PgPool>) -> Self {
        let store: Arc<dyn MessageStore> = match &db_pool {
            Some(pool) => Arc::new(PgMessageStore::new(pool.clone())),
            None => {
                tracing::warn!("No database configured. Chat history is kept in memory.");
                Arc::new(MemoryMessageStore::new())
            }
        };
        let chat = ChatHandler::new(store)
            .with_history_limit(config.chat_history_limit)
            .with_codec(Arc::new(JsonCodec::new(config.chat_max_payload_bytes)));

        Self {
            config: Arc::new(config),
            db_pool,
            chat,
        }
    }
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for ChatHandler {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.chat.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::chat::test_support::RecordingConnection;
    use crate::backend::chat::ChatError;

    #[test]
    fn test_state_without_database_uses_configured_history_limit() {
        let config = ServerConfig {
            chat_history_limit: 7,
            ..ServerConfig::default()
        };
        let state = AppState::new(config, None);

        assert!(state.db_pool.is_none());
        assert_eq!(state.chat.history_limit(), 7);
        assert_eq!(Arc::<ServerConfig>::from_ref(&state).chat_history_limit, 7);
    }

    #[tokio::test]
    async fn test_configured_payload_limit_reaches_chat_codec() {
        let config = ServerConfig {
            chat_max_payload_bytes: 32,
            ..ServerConfig::default()
        };
        let state = AppState::new(config, None);
        let alice = RecordingConnection::new();
        state.chat.on_connect(alice.clone()).await;

        let short = r#"{"sender":"al","body":"hi"}"#;
        let long = r#"{"sender":"alice","body":"this one is well over the limit"}"#;

        assert!(state.chat.on_message(&*alice, short).await.is_ok());
        assert!(matches!(
            state.chat.on_message(&*alice, long).await,
            Err(ChatError::MalformedPayload(_))
        ));
    }
}
