/**
 * Chat Message Data Structures
 *
 * This module defines the chat message shapes that travel over the chat
 * WebSocket, in both directions.
 *
 * # Wire Format
 *
 * Outbound (server to client) messages always carry the store-assigned
 * `id` and the server-assigned `timestamp` in milliseconds since the epoch:
 *
 * ```json
 * {"id": 1, "sender": "alice", "body": "hi", "timestamp": 1700000000000}
 * ```
 *
 * Inbound (client to server) messages only need `sender` and `body`. The
 * aliases `username` (for `sender`) and `content` / `text` (for `body`) are
 * accepted as well. Any `id` or `timestamp` the client sends is ignored.
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// A chat message as persisted by the message store and broadcast to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Store-assigned identifier
    pub id: i64,
    /// Optional id of the shop user that sent the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Display label of the sender
    pub sender: String,
    /// Message text
    pub body: String,
    /// Server receipt time, milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// A validated chat message that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    pub user_id: Option<String>,
    pub sender: String,
    pub body: String,
    pub timestamp: i64,
}

impl NewChatMessage {
    /// Attach the identifier the store assigned
    pub fn with_id(self, id: i64) -> ChatMessage {
        ChatMessage {
            id,
            user_id: self.user_id,
            sender: self.sender,
            body: self.body,
            timestamp: self.timestamp,
        }
    }
}

/// Chat message candidate as received from a client
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation error naming the field, not as an opaque
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InboundChatMessage {
    #[serde(default, alias = "username")]
    pub sender: Option<String>,
    #[serde(default, alias = "content", alias = "text")]
    pub body: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl InboundChatMessage {
    /// Validate the candidate and stamp it with the server receipt time
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `sender` or `body` is missing or blank.
    pub fn into_new_message(self, timestamp: i64) -> Result<NewChatMessage, SharedError> {
        let sender = required(self.sender, "sender")?;
        let body = required(self.body, "body")?;

        Ok(NewChatMessage {
            user_id: self.user_id.filter(|id| !id.trim().is_empty()),
            sender,
            body,
            timestamp,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, SharedError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(SharedError::validation(field, format!("{} cannot be blank", field))),
        None => Err(SharedError::validation(field, format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inbound_accepts_aliases() {
        let inbound: InboundChatMessage =
            serde_json::from_str(r#"{"username":"bob","text":"yo","userId":"7"}"#).unwrap();
        let message = inbound.into_new_message(42).unwrap();

        assert_eq!(message.sender, "bob");
        assert_eq!(message.body, "yo");
        assert_eq!(message.user_id.as_deref(), Some("7"));
        assert_eq!(message.timestamp, 42);
    }

    #[test]
    fn test_inbound_ignores_client_id_and_timestamp() {
        let inbound: InboundChatMessage =
            serde_json::from_str(r#"{"id":99,"sender":"alice","content":"hi","timestamp":0}"#)
                .unwrap();
        let message = inbound.into_new_message(1_700_000_000_000).unwrap();

        assert_eq!(message.timestamp, 1_700_000_000_000);
        assert_eq!(message.with_id(1).id, 1);
    }

    #[test]
    fn test_missing_body_is_rejected() {
        let inbound: InboundChatMessage = serde_json::from_str(r#"{"sender":"alice"}"#).unwrap();
        let err = inbound.into_new_message(1).unwrap_err();

        assert_eq!(err, SharedError::validation("body", "body is required"));
    }

    #[test]
    fn test_blank_sender_is_rejected() {
        let inbound: InboundChatMessage =
            serde_json::from_str(r#"{"sender":"  ","body":"hi"}"#).unwrap();
        assert!(matches!(
            inbound.into_new_message(1),
            Err(SharedError::ValidationError { ref field, .. }) if field == "sender"
        ));
    }

    #[test]
    fn test_outbound_shape() {
        let message = ChatMessage {
            id: 1,
            user_id: None,
            sender: "alice".to_string(),
            body: "hi".to_string(),
            timestamp: 5,
        };
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 1, "sender": "alice", "body": "hi", "timestamp": 5})
        );
    }
}
