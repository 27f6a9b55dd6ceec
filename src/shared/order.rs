//! Order Types
//!
//! An order is a snapshot of the cart at checkout time. Item names and prices
//! are copied into the order so later catalog edits do not rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::error::SharedError;

/// Shipping address supplied at checkout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingData {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// A cart line as sent by the storefront
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    /// Product id; the storefront sends either a number or a string
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Checkout request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Ignored; the authenticated user places the order
    #[serde(default)]
    pub user_id: Option<String>,
    /// Ignored; the total is recomputed from the items
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub shipping: Option<ShippingData>,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

/// Validated order ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: String,
    pub total: f64,
    pub shipping: ShippingData,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

impl OrderRequest {
    /// Snapshot the cart into an order owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the cart is empty or a line has a
    /// non-positive quantity or a negative price.
    pub fn snapshot(self, user_id: impl Into<String>) -> Result<NewOrder, SharedError> {
        if self.items.is_empty() {
            return Err(SharedError::validation("items", "Order must contain at least one item"));
        }

        let mut items = Vec::with_capacity(self.items.len());
        for item in self.items {
            if item.quantity < 1 {
                return Err(SharedError::validation(
                    "quantity",
                    format!("Quantity for '{}' must be at least 1", item.name),
                ));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(SharedError::validation(
                    "price",
                    format!("Price for '{}' must be a non-negative number", item.name),
                ));
            }
            items.push(NewOrderItem {
                product_id: item.id,
                name: item.name,
                price: item.price,
                quantity: item.quantity,
            });
        }

        let total = items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();

        Ok(NewOrder {
            user_id: user_id.into(),
            total,
            shipping: self.shipping.unwrap_or_default(),
            items,
        })
    }
}

/// A persisted order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// A persisted order with its lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: String,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub items: Vec<OrderItem>,
}

/// Response to a successful checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub order_id: i64,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
