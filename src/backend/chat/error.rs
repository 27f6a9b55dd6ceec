/**
 * Chat Error Types
 *
 * Every chat failure is scoped to the single operation or connection that
 * caused it. None of these errors close a connection on their own; the
 * socket layer decides what the client sees.
 *
 * # Error Categories
 *
 * - `MalformedPayload` - inbound frame could not be parsed into a message
 * - `Persistence` - the message store rejected a write, nothing is broadcast
 * - `HistoryFetch` - history could not be loaded for a new connection
 * - `SendFailure` - one connection could not accept an outbound frame
 * - `Serialization` - a stored message could not be encoded
 */

use thiserror::Error;

use crate::backend::chat::connection::ConnectionId;
use crate::shared::SharedError;

/// Failure reported by a message store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database driver error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store cannot take requests right now
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}

/// Chat-specific error types
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("malformed payload: {0}")]
    MalformedPayload(#[source] SharedError),

    #[error("failed to persist message: {0}")]
    Persistence(#[source] StoreError),

    #[error("failed to fetch chat history: {0}")]
    HistoryFetch(#[source] StoreError),

    #[error("failed to send to connection {connection}: {reason}")]
    SendFailure {
        connection: ConnectionId,
        reason: String,
    },

    #[error("failed to encode message: {0}")]
    Serialization(#[source] SharedError),
}

impl ChatError {
    /// Create a send failure for a connection
    pub fn send_failure(connection: ConnectionId, reason: impl Into<String>) -> Self {
        Self::SendFailure {
            connection,
            reason: reason.into(),
        }
    }

    /// Short machine-readable tag used in error frames
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedPayload(_) => "malformed_payload",
            Self::Persistence(_) => "persistence_error",
            Self::HistoryFetch(_) => "history_fetch_error",
            Self::SendFailure { .. } => "send_failure",
            Self::Serialization(_) => "serialization_error",
        }
    }

    /// Text safe to send to a client
    ///
    /// Storage and encoding details stay in the server log.
    pub fn client_message(&self) -> String {
        match self {
            Self::MalformedPayload(_) => self.to_string(),
            Self::Persistence(_) => "Message could not be saved".to_string(),
            Self::HistoryFetch(_) => "Chat history is unavailable".to_string(),
            Self::SendFailure { .. } => "Message could not be delivered".to_string(),
            Self::Serialization(_) => "Message could not be encoded".to_string(),
        }
    }
}
