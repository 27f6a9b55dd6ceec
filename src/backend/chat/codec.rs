//! Chat wire codec
//!
//! The handler owns one codec, chosen at construction, instead of reaching
//! for a global serializer. `JsonCodec` is the only production codec.

use crate::backend::chat::error::ChatError;
use crate::shared::{ChatMessage, InboundChatMessage, SharedError};

/// Default upper bound on an inbound frame
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 16 * 1024;

/// Translates between chat frames and message types
pub trait MessageCodec: Send + Sync {
    /// Parse an inbound frame into a message candidate
    fn decode(&self, raw: &str) -> Result<InboundChatMessage, SharedError>;

    /// Serialize a stored message for delivery
    fn encode(&self, message: &ChatMessage) -> Result<String, SharedError>;

    /// Serialize an error frame for the connection that caused it
    fn encode_error(&self, error: &ChatError) -> String;
}

/// JSON codec with an upper bound on inbound frame size
#[derive(Debug, Clone)]
pub struct JsonCodec {
    max_payload_bytes: usize,
}

impl JsonCodec {
    pub fn new(max_payload_bytes: usize) -> Self {
        Self { max_payload_bytes }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAYLOAD_BYTES)
    }
}

impl MessageCodec for JsonCodec {
    fn decode(&self, raw: &str) -> Result<InboundChatMessage, SharedError> {
        if raw.len() > self.max_payload_bytes {
            return Err(SharedError::message(format!(
                "payload of {} bytes exceeds the {} byte limit",
                raw.len(),
                self.max_payload_bytes
            )));
        }
        Ok(serde_json::from_str(raw)?)
    }

    fn encode(&self, message: &ChatMessage) -> Result<String, SharedError> {
        Ok(serde_json::to_string(message)?)
    }

    fn encode_error(&self, error: &ChatError) -> String {
        serde_json::json!({
            "error": error.client_message(),
            "kind": error.kind(),
        })
        .to_string()
    }
}
