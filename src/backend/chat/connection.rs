//! Chat connection handles
//!
//! The chat core never touches a socket directly. It talks to a
//! [`Connection`], which can push one serialized frame and report whether the
//! peer is still there. The WebSocket layer provides [`SocketConnection`];
//! tests provide their own recording implementations.

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::chat::error::ChatError;

/// Identity of a registered connection
pub type ConnectionId = Uuid;

/// An open chat connection as seen by the registry
pub trait Connection: Send + Sync {
    /// Stable id for the lifetime of the connection
    fn id(&self) -> ConnectionId;

    /// Queue one serialized frame for delivery
    fn send(&self, payload: &str) -> Result<(), ChatError>;

    /// Whether the peer can still receive frames
    fn is_open(&self) -> bool;
}

/// Connection backed by the outbound queue of a WebSocket writer task
///
/// Sending never waits on the network. Frames go into an unbounded queue
/// that the writer task drains into the socket. Once the writer stops (the
/// socket closed or errored) the queue is closed and every further send fails.
#[derive(Debug, Clone)]
pub struct SocketConnection {
    id: ConnectionId,
    username: String,
    outbound: mpsc::UnboundedSender<String>,
}

impl SocketConnection {
    /// Create a connection and the receiving end its writer task drains
    pub fn new(username: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (outbound, rx) = mpsc::unbounded_channel();
        let connection = Self {
            id: Uuid::new_v4(),
            username: username.into(),
            outbound,
        };
        (connection, rx)
    }

    /// Name the client gave when connecting (logging only)
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Connection for SocketConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn send(&self, payload: &str) -> Result<(), ChatError> {
        self.outbound
            .send(payload.to_owned())
            .map_err(|_| ChatError::send_failure(self.id, "outbound queue closed"))
    }

    fn is_open(&self) -> bool {
        !self.outbound.is_closed()
    }
}
