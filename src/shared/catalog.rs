//! Product Catalog Types
//!
//! Products are exchanged with the storefront in camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: i32,
}

/// Body of a create or update request
///
/// Any `id` in the body is ignored; the path parameter (or the database)
/// decides which product is written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: Option<i32>,
}

impl ProductPayload {
    /// Check the fields the catalog cannot store meaningfully
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.name.trim().is_empty() {
            return Err(SharedError::validation("name", "Product name cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SharedError::validation("price", "Price must be a non-negative number"));
        }
        if matches!(self.stock, Some(stock) if stock < 0) {
            return Err(SharedError::validation("stock", "Stock cannot be negative"));
        }
        Ok(())
    }
}
