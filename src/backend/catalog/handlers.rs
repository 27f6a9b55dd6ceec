//! Product catalog handlers
//!
//! Listing is public. Creating, updating and deleting products needs an
//! admin token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;

use crate::backend::catalog::db;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AdminUser;
use crate::shared::{Product, ProductPayload};

/// GET /api/products
pub async fn list_products(
    State(pool): State<Option<PgPool>>,
) -> Result<Json<Vec<Product>>, BackendError> {
    let pool = pool.ok_or_else(BackendError::unavailable)?;
    let products = db::list_products(&pool).await?;
    tracing::debug!("Listing {} products", products.len());
    Ok(Json(products))
}

/// POST /api/products
pub async fn create_product(
    State(pool): State<Option<PgPool>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Product>), BackendError> {
    let pool = pool.ok_or_else(BackendError::unavailable)?;
    payload.validate()?;

    let product = db::insert_product(&pool, &payload).await?;
    tracing::info!("Product {} created by {}", product.id, admin.username);

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(pool): State<Option<PgPool>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, BackendError> {
    let pool = pool.ok_or_else(BackendError::unavailable)?;
    payload.validate()?;

    let product = db::update_product(&pool, id, &payload)
        .await?
        .ok_or_else(|| BackendError::not_found("Product not found"))?;
    tracing::info!("Product {} updated by {}", id, admin.username);

    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(pool): State<Option<PgPool>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let pool = pool.ok_or_else(BackendError::unavailable)?;

    if !db::delete_product(&pool, id).await? {
        return Err(BackendError::not_found("Product not found"));
    }
    tracing::info!("Product {} deleted by {}", id, admin.username);

    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_products_no_database() {
        let result = list_products(State(None)).await;
        assert_eq!(result.unwrap_err().status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
