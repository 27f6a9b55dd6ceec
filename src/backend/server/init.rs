/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, seeding, state creation and routing.
 *
 * # Initialization Process
 *
 * 1. Connect to the database and run migrations (if configured)
 * 2. Seed demo users and products into empty tables
 * 3. Build the application state and chat handler
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::seed::seed_database;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: Server continues with in-memory chat and 503 for
///   database-backed routes
/// - Migration or seeding failures: Logged but don't prevent startup
pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("Initializing ReactShop backend server");

    let db_pool = load_database(config.database_url.as_deref()).await;

    if let Some(pool) = &db_pool {
        if let Err(e) = seed_database(pool).await {
            tracing::error!("Failed to seed database: {}", e);
        }
    }

    let app_state = AppState::new(config, db_pool);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    app
}
