//! Common test utilities and helpers
//!
//! - Database fixture for the `#[ignore]`d PostgreSQL tests
//! - Token and config helpers for the HTTP tests
//! - Recording chat connection for the broadcast tests

#![allow(dead_code)]

pub mod auth_helpers;
pub mod chat_helpers;
pub mod database;

pub use auth_helpers::*;
pub use chat_helpers::*;
pub use database::*;
