//! Middleware Module
//!
//! Request guards shared by the REST routes.
//!
//! - **`auth`** - `AuthUser` and `AdminUser` extractors backed by JWT bearer tokens

pub mod auth;

pub use auth::{AdminUser, AuthUser};
