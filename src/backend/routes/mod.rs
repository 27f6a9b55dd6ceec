//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, CORS, tracing and fallback
//! - **`chat_routes`** - Chat WebSocket route
//! - **`api_routes`** - REST endpoints (auth, products, orders)
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── chat_routes.rs  - Chat route
//! └── api_routes.rs   - API routes
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use reactshop::backend::routes::create_router;
//! use reactshop::backend::server::{AppState, ServerConfig};
//!
//! let router = create_router(AppState::new(ServerConfig::default(), None));
//! ```

pub mod router;

pub mod chat_routes;

pub mod api_routes;

pub use router::create_router;
