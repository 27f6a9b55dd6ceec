/**
 * Chat Message Store
 *
 * The message store is the durable, append-only log of chat messages. The
 * chat handler only needs two operations from it: append a message (getting
 * the assigned id back) and read the most recent N messages in chronological
 * order.
 *
 * # Implementations
 *
 * - `PgMessageStore` - PostgreSQL `chat_messages` table, ids from BIGSERIAL
 * - `MemoryMessageStore` - in-process log used when no database is configured
 *
 * # Ordering
 *
 * Both implementations return history sorted ascending by
 * `(timestamp, id)`, so messages that share a millisecond still come back in
 * insertion order.
 */

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::backend::chat::error::StoreError;
use crate::shared::{ChatMessage, NewChatMessage};

/// Durable log of chat messages
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message and return it with its assigned id
    async fn save(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError>;

    /// The most recent `limit` messages, oldest first
    async fn recent_messages(&self, limit: usize) -> Result<Vec<ChatMessage>, StoreError>;
}

/// PostgreSQL-backed message store
#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ChatMessageRow {
    id: i64,
    user_id: Option<String>,
    sender: String,
    body: String,
    timestamp: i64,
}

impl From<ChatMessageRow> for ChatMessage {
    fn from(row: ChatMessageRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            sender: row.sender,
            body: row.body,
            timestamp: row.timestamp,
        }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn save(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO chat_messages (user_id, sender, body, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#
        )
        .bind(&message.user_id)
        .bind(&message.sender)
        .bind(&message.body)
        .bind(message.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(message.with_id(id))
    }

    async fn recent_messages(&self, limit: usize) -> Result<Vec<ChatMessage>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, ChatMessageRow>(
            r#"
            SELECT id, user_id, sender, body, timestamp
            FROM (
                SELECT id, user_id, sender, body, timestamp
                FROM chat_messages
                ORDER BY timestamp DESC, id DESC
                LIMIT $1
            ) recent
            ORDER BY timestamp ASC, id ASC
            "#
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }
}

/// Messages kept sorted by (timestamp, id)
#[derive(Default)]
struct MemoryLog {
    messages: Vec<ChatMessage>,
    last_id: i64,
}

/// In-process message store
///
/// Ids start at 1 and increase by one per saved message. Contents are lost on
/// restart.
#[derive(Default)]
pub struct MemoryMessageStore {
    log: RwLock<MemoryLog>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages
    pub async fn len(&self) -> usize {
        self.log.read().await.messages.len()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn save(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let mut log = self.log.write().await;
        log.last_id += 1;
        let saved = message.with_id(log.last_id);

        // Server timestamps are almost always non-decreasing, so this is
        // normally an append.
        let key = (saved.timestamp, saved.id);
        let at = log.messages.partition_point(|m| (m.timestamp, m.id) <= key);
        log.messages.insert(at, saved.clone());
        Ok(saved)
    }

    async fn recent_messages(&self, limit: usize) -> Result<Vec<ChatMessage>, StoreError> {
        let log = self.log.read().await;
        let skip = log.messages.len().saturating_sub(limit);
        Ok(log.messages[skip..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(body: &str, timestamp: i64) -> NewChatMessage {
        NewChatMessage {
            user_id: None,
            sender: "alice".to_string(),
            body: body.to_string(),
            timestamp,
        }
    }

    #[tokio::test]
    async fn test_memory_store_assigns_sequential_ids() {
        let store = MemoryMessageStore::new();

        let first = store.save(new_message("one", 10)).await.unwrap();
        let second = store.save(new_message("two", 11)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_memory_store_returns_most_recent_ascending() {
        let store = MemoryMessageStore::new();
        for i in 0..10 {
            store.save(new_message(&format!("m{}", i), 100 + i)).await.unwrap();
        }

        let recent = store.recent_messages(3).await.unwrap();
        let bodies: Vec<_> = recent.iter().map(|m| m.body.as_str()).collect();

        assert_eq!(bodies, vec!["m7", "m8", "m9"]);
    }

    #[tokio::test]
    async fn test_memory_store_orders_by_timestamp_then_id() {
        let store = MemoryMessageStore::new();
        store.save(new_message("late", 50)).await.unwrap();
        store.save(new_message("early", 40)).await.unwrap();
        store.save(new_message("tie", 50)).await.unwrap();

        let recent = store.recent_messages(10).await.unwrap();
        let bodies: Vec<_> = recent.iter().map(|m| m.body.as_str()).collect();

        assert_eq!(bodies, vec!["early", "late", "tie"]);
    }

    #[tokio::test]
    async fn test_memory_store_limit_larger_than_log() {
        let store = MemoryMessageStore::new();
        store.save(new_message("only", 1)).await.unwrap();

        assert_eq!(store.recent_messages(50).await.unwrap().len(), 1);
        assert!(store.recent_messages(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_out_of_order_save_lands_in_window() {
        let store = MemoryMessageStore::new();
        for i in 0..5 {
            store.save(new_message(&format!("m{}", i), 100 + i)).await.unwrap();
        }
        store.save(new_message("backdated", 102)).await.unwrap();

        let recent = store.recent_messages(4).await.unwrap();
        let bodies: Vec<_> = recent.iter().map(|m| m.body.as_str()).collect();

        assert_eq!(bodies, vec!["m2", "backdated", "m3", "m4"]);
    }
}
