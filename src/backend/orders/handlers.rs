/**
 * Order Handlers
 *
 * - POST /api/orders - any signed-in user places an order
 * - GET /api/orders - admins list every order
 *
 * The order belongs to the token's user, whatever `userId` the body claims,
 * and its total is recomputed from the item snapshot.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::PgPool;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::{AdminUser, AuthUser};
use crate::backend::orders::db;
use crate::shared::{Order, OrderRequest, PlaceOrderResponse};

pub async fn place_order(
    State(pool): State<Option<PgPool>>,
    auth: AuthUser,
    Json(request): Json<OrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), BackendError> {
    let pool = pool.ok_or_else(BackendError::unavailable)?;

    if let Some(claimed) = request.user_id.as_deref() {
        if claimed != auth.user_id.to_string() {
            tracing::warn!("Order body names user {} but token is {}", claimed, auth.user_id);
        }
    }

    let order = request.snapshot(auth.user_id.to_string())?;
    let order_id = db::insert_order(&pool, &order).await?;

    tracing::info!(
        "Order {} placed by {} ({} items, total {:.2})",
        order_id,
        auth.username,
        order.items.len(),
        order.total
    );

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            success: true,
            order_id,
        }),
    ))
}

pub async fn list_orders(
    State(pool): State<Option<PgPool>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<Order>>, BackendError> {
    let pool = pool.ok_or_else(BackendError::unavailable)?;
    Ok(Json(db::list_orders(&pool).await?))
}
