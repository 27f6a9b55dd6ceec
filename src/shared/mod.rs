//! Shared Module
//!
//! This module contains types and data structures that cross the wire: the
//! JSON shapes exchanged with the storefront over HTTP and the chat messages
//! exchanged over the chat WebSocket.
//!
//! # Overview
//!
//! The shared module has no server dependencies. Everything here is plain
//! serde data plus pure validation, so it can be unit tested without a
//! database or a running server.

/// Chat message wire types
pub mod chat;

/// Product catalog types
pub mod catalog;

/// Order and checkout types
pub mod order;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use chat::{ChatMessage, InboundChatMessage, NewChatMessage};
pub use catalog::{Product, ProductPayload};
pub use order::{Order, OrderItem, OrderRequest, NewOrder, NewOrderItem, PlaceOrderResponse, ShippingData};
pub use error::SharedError;
