/**
 * Chat Handler
 *
 * The chat handler ties a connection's lifecycle to the registry, the
 * message store and the codec:
 *
 * - `on_connect` registers the connection, then replays recent history to it
 * - `on_message` decodes, timestamps, persists, then broadcasts to everyone
 * - `on_disconnect` removes the connection from the registry
 *
 * # Ordering
 *
 * A message is broadcast only after the store has accepted it, and the
 * broadcast payload is the stored message (with its assigned id and the
 * server timestamp). Frames from one connection are handled one at a time,
 * so that connection's messages are persisted and broadcast in the order they
 * were received.
 *
 * Registration happens before the history read, so no message is missed.
 * Until the replay ends, broadcasts to the new connection are held in the
 * registry. They are sent after the history, minus any message the history
 * already contained, so every message arrives exactly once.
 */

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::backend::chat::codec::{JsonCodec, MessageCodec};
use crate::backend::chat::connection::{Connection, ConnectionId};
use crate::backend::chat::error::ChatError;
use crate::backend::chat::registry::ConnectionRegistry;
use crate::backend::chat::store::MessageStore;
use crate::shared::ChatMessage;

/// Number of messages replayed to a new connection unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Chat core shared by every connection
#[derive(Clone)]
pub struct ChatHandler {
    registry: ConnectionRegistry,
    store: Arc<dyn MessageStore>,
    codec: Arc<dyn MessageCodec>,
    history_limit: usize,
}

impl ChatHandler {
    /// Create a handler with the JSON codec and the default history limit
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            store,
            codec: Arc::new(JsonCodec::default()),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn with_codec(mut self, codec: Arc<dyn MessageCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Register a new connection and replay recent history to it
    ///
    /// History goes to this connection only, ahead of any live message. A
    /// failed history read is logged and the connection stays registered
    /// with no history.
    ///
    /// # Returns
    ///
    /// Number of history messages delivered
    pub async fn on_connect(&self, connection: Arc<dyn Connection>) -> usize {
        let id = connection.id();
        self.registry.register_replaying(Arc::clone(&connection));
        tracing::info!("[Chat] Connection {} joined ({} online)", id, self.registry.len());

        let history = match self.store.recent_messages(self.history_limit).await {
            Ok(history) => history,
            Err(e) => {
                let err = ChatError::HistoryFetch(e);
                tracing::error!("[Chat] {} for {}", err, id);
                self.registry.finish_replay(id, &HashSet::new());
                return 0;
            }
        };

        let mut delivered = 0;
        for message in &history {
            let frame = match self.codec.encode(message) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("[Chat] Skipping history message {}: {}", message.id, e);
                    continue;
                }
            };
            if let Err(e) = connection.send(&frame) {
                tracing::warn!("[Chat] History replay stopped: {}", e);
                break;
            }
            delivered += 1;
        }

        let replayed: HashSet<i64> = history.iter().map(|m| m.id).collect();
        let caught_up = self.registry.finish_replay(id, &replayed);

        tracing::debug!(
            "[Chat] Replayed {} messages to {} ({} live messages caught up)",
            delivered,
            id,
            caught_up
        );
        delivered
    }

    /// Handle one inbound frame from `connection`
    ///
    /// # Errors
    ///
    /// - `MalformedPayload` if the frame does not decode into a valid message
    /// - `Persistence` if the store rejects the message (nothing is broadcast)
    /// - `Serialization` if the stored message cannot be encoded
    pub async fn on_message(
        &self,
        connection: &dyn Connection,
        raw: &str,
    ) -> Result<ChatMessage, ChatError> {
        let candidate = self
            .codec
            .decode(raw)
            .and_then(|inbound| inbound.into_new_message(Utc::now().timestamp_millis()))
            .map_err(ChatError::MalformedPayload)?;

        let saved = self
            .store
            .save(candidate)
            .await
            .map_err(ChatError::Persistence)?;

        let frame = self.codec.encode(&saved).map_err(ChatError::Serialization)?;
        let report = self.registry.broadcast(saved.id, &frame);

        tracing::info!(
            "[Chat] Message {} from {} ({}) delivered to {} connections",
            saved.id,
            saved.sender,
            connection.id(),
            report.delivered
        );
        Ok(saved)
    }

    /// Remove a connection from the registry; unknown ids are ignored
    pub fn on_disconnect(&self, id: ConnectionId) -> bool {
        let removed = self.registry.deregister(id);
        if removed {
            tracing::info!("[Chat] Connection {} left ({} online)", id, self.registry.len());
        }
        removed
    }

    /// Tell the connection that caused `error` what went wrong
    pub fn report_error(&self, connection: &dyn Connection, error: &ChatError) {
        tracing::warn!("[Chat] Error on connection {}: {}", connection.id(), error);
        if let Err(e) = connection.send(&self.codec.encode_error(error)) {
            tracing::debug!("[Chat] Could not deliver error frame: {}", e);
        }
    }
}
