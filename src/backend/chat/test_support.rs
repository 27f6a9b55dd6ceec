//! In-crate test doubles for the chat core

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::backend::chat::connection::{Connection, ConnectionId};
use crate::backend::chat::error::ChatError;

/// Connection that records every frame it accepts
#[derive(Default)]
pub struct RecordingConnection {
    id: ConnectionId,
    frames: Mutex<Vec<String>>,
    failing: AtomicBool,
    closed: AtomicBool,
}

impl RecordingConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            ..Self::default()
        })
    }

    pub fn received(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }

    pub fn fail_sends(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl Connection for RecordingConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn send(&self, payload: &str) -> Result<(), ChatError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ChatError::send_failure(self.id, "simulated transport failure"));
        }
        self.frames.lock().unwrap().push(payload.to_string());
        Ok(())
    }

    fn is_open(&self) -> bool {
        !self.closed.load(Ordering::SeqCst)
    }
}
