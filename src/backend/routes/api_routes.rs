/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `GET /api/auth/me` - Get current user info (requires authentication)
 *
 * ## Products
 * - `GET /api/products` - List products
 * - `POST /api/products` - Create product (admin)
 * - `PUT /api/products/{id}` - Update product (admin)
 * - `DELETE /api/products/{id}` - Delete product (admin)
 *
 * ## Orders
 * - `POST /api/orders` - Place order (requires authentication)
 * - `GET /api/orders` - List all orders (admin)
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::catalog::{create_product, delete_product, list_products, update_product};
use crate::backend::orders::{list_orders, place_order};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(get_me))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/{id}", put(update_product).delete(delete_product))
        .route("/api/orders", post(place_order).get(list_orders))
}
