//! Chat Backend Module
//!
//! Live chat over WebSocket. Every connected client receives every message,
//! and a newly connected client first receives the most recent history.
//!
//! # Architecture
//!
//! - **`connection`** - the `Connection` trait and the WebSocket-backed handle
//! - **`registry`** - concurrency-safe set of open connections, broadcast
//! - **`store`** - `MessageStore` trait with PostgreSQL and in-memory stores
//! - **`codec`** - `MessageCodec` trait and the JSON codec
//! - **`handler`** - `ChatHandler`, the connect / message / disconnect flow
//! - **`socket`** - axum WebSocket upgrade and per-connection loop
//! - **`error`** - `ChatError` and `StoreError`
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use reactshop::backend::chat::{ChatHandler, MemoryMessageStore};
//!
//! let handler = ChatHandler::new(Arc::new(MemoryMessageStore::new())).with_history_limit(20);
//! assert!(handler.registry().is_empty());
//! ```

pub mod codec;
pub mod connection;
pub mod error;
pub mod handler;
pub mod registry;
pub mod socket;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use codec::{JsonCodec, MessageCodec};
pub use connection::{Connection, ConnectionId, SocketConnection};
pub use error::{ChatError, StoreError};
pub use handler::{ChatHandler, DEFAULT_HISTORY_LIMIT};
pub use registry::{BroadcastReport, ConnectionRegistry};
pub use socket::chat_upgrade;
pub use store::{MemoryMessageStore, MessageStore, PgMessageStore};
