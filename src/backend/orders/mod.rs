//! Orders Module
//!
//! - **`db`** - transactional order insert and listing
//! - **`handlers`** - REST handlers for `/api/orders`

pub mod db;
pub mod handlers;

pub use handlers::{list_orders, place_order};
