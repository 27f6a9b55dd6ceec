/**
 * Order Database Operations
 *
 * Orders are written together with their item snapshot in a single
 * transaction, so an order is never visible without its items.
 */

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::shared::{NewOrder, Order, OrderItem};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: String,
    total: f64,
    created_at: DateTime<Utc>,
    full_name: Option<String>,
    address: Option<String>,
    city: Option<String>,
    zip: Option<String>,
    country: Option<String>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    product_id: String,
    name: String,
    price: f64,
    quantity: i32,
}

/// Insert an order and its items; returns the new order id
pub async fn insert_order(pool: &PgPool, order: &NewOrder) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let order_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO orders (user_id, total, full_name, address, city, zip, country)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#
    )
    .bind(&order.user_id)
    .bind(order.total)
    .bind(&order.shipping.full_name)
    .bind(&order.shipping.address)
    .bind(&order.shipping.city)
    .bind(&order.shipping.zip)
    .bind(&order.shipping.country)
    .fetch_one(&mut *tx)
    .await?;

    for item in &order.items {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, name, price, quantity)
            VALUES ($1, $2, $3, $4, $5)
            "#
        )
        .bind(order_id)
        .bind(&item.product_id)
        .bind(&item.name)
        .bind(item.price)
        .bind(item.quantity)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(order_id)
}

/// Every order with its items, newest first
pub async fn list_orders(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as::<_, OrderRow>(
        r#"
        SELECT id, user_id, total, created_at, full_name, address, city, zip, country
        FROM orders
        ORDER BY created_at DESC, id DESC
        "#
    )
    .fetch_all(pool)
    .await?;

    let items = sqlx::query_as::<_, OrderItemRow>(
        r#"
        SELECT id, order_id, product_id, name, price, quantity
        FROM order_items
        ORDER BY id
        "#
    )
    .fetch_all(pool)
    .await?;

    let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        items_by_order.entry(item.order_id).or_default().push(OrderItem {
            id: item.id,
            product_id: item.product_id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
        });
    }

    Ok(orders
        .into_iter()
        .map(|row| Order {
            items: items_by_order.remove(&row.id).unwrap_or_default(),
            id: row.id,
            user_id: row.user_id,
            total: row.total,
            created_at: row.created_at,
            full_name: row.full_name,
            address: row.address,
            city: row.city,
            zip: row.zip,
            country: row.country,
        })
        .collect())
}
