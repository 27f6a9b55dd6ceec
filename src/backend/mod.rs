//! Backend Module
//!
//! This module contains all server-side code for ReactShop: the Axum HTTP
//! server, the REST API for accounts, products and orders, and the live chat
//! room served over WebSocket.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`chat`** - Chat broadcast handler, connection registry, message store
//! - **`auth`** - Registration, login, JWT tokens, user storage
//! - **`catalog`** - Product listing and admin product management
//! - **`orders`** - Checkout and admin order listing
//! - **`seed`** - Demo users and products for empty databases
//! - **`middleware`** - `AuthUser` / `AdminUser` request guards
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── chat/           - Live chat
//! ├── auth/           - Authentication
//! ├── catalog/        - Products
//! ├── orders/         - Orders
//! ├── seed.rs         - Demo data
//! ├── middleware/     - Request guards
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! The backend uses shared state (`AppState`) that contains:
//! - Server configuration
//! - Optional PostgreSQL pool (database routes answer 503 without it)
//! - The chat handler
//!
//! # Error Handling
//!
//! REST handlers return `BackendError`, which renders as a JSON body with
//! `error` and `status`. Chat failures are `ChatError`s and are reported to
//! the offending connection as an error frame.

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Live chat over WebSocket
#[cfg(feature = "ssr")]
pub mod chat;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and user management
#[cfg(feature = "ssr")]
pub mod auth;

/// Product catalog
#[cfg(feature = "ssr")]
pub mod catalog;

/// Orders and checkout
#[cfg(feature = "ssr")]
pub mod orders;

/// Demo data seeding
#[cfg(feature = "ssr")]
pub mod seed;

/// Request guards
#[cfg(feature = "ssr")]
pub mod middleware;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use server::{create_app, AppState, ServerConfig};
#[cfg(feature = "ssr")]
pub use chat::ChatHandler;
#[cfg(feature = "ssr")]
pub use error::BackendError;
