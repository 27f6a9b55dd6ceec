/**
 * Chat Route Handlers
 *
 * # Routes
 *
 * - `GET /chat?username=<name>` - WebSocket upgrade for live chat
 */

use axum::{routing::get, Router};

use crate::backend::chat::chat_upgrade;
use crate::backend::server::state::AppState;

/// Configure chat-related routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with chat routes configured
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/chat", get(chat_upgrade))
}
