//! Product Catalog Module
//!
//! - **`db`** - `products` table operations
//! - **`handlers`** - REST handlers for `/api/products`

pub mod db;
pub mod handlers;

pub use handlers::{create_product, delete_product, list_products, update_product};
