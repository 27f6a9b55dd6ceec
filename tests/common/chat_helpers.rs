//! Chat test helpers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use reactshop::backend::chat::{ChatError, Connection, ConnectionId};
use reactshop::shared::ChatMessage;
use uuid::Uuid;

/// Connection that keeps every frame it is sent
pub struct TestConnection {
    id: ConnectionId,
    frames: Mutex<Vec<String>>,
    broken: AtomicBool,
}

impl TestConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            frames: Mutex::new(Vec::new()),
            broken: AtomicBool::new(false),
        })
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }

    /// Frames decoded as chat messages; error frames are skipped
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.frames()
            .iter()
            .filter_map(|f| serde_json::from_str(f).ok())
            .collect()
    }

    pub fn break_transport(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }
}

impl Connection for TestConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn send(&self, payload: &str) -> Result<(), ChatError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(ChatError::send_failure(self.id, "broken transport"));
        }
        self.frames.lock().unwrap().push(payload.to_string());
        Ok(())
    }

    fn is_open(&self) -> bool {
        !self.broken.load(Ordering::SeqCst)
    }
}

/// Inbound chat frame
pub fn chat_frame(sender: &str, body: &str) -> String {
    serde_json::json!({ "sender": sender, "body": body }).to_string()
}
