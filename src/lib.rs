//! ReactShop - Main Library
//!
//! ReactShop is the backend of a small web shop: account registration and
//! login, a product catalog, checkout, and a shop-wide chat room that every
//! visitor can join over a WebSocket.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared with the storefront
//!   - Chat messages, products, orders
//!   - Validation and error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and application state
//!   - Authentication (bcrypt + JWT)
//!   - Catalog and order persistence (PostgreSQL via sqlx)
//!   - Chat broadcast handler, connection registry and message store
//!
//! # Feature Flags
//!
//! - **`ssr`** - Server build (enabled by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use reactshop::backend::server::{create_app, config::ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state is shared through `AppState`, which is cheap to clone.
//! The chat connection registry is the only shared mutable structure and is
//! guarded by an `RwLock`.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
