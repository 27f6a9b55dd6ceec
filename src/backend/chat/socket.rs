//! WebSocket transport for the chat handler
//!
//! `GET /chat?username=<name>` upgrades to a WebSocket. Each connection gets a
//! writer task that drains its outbound queue into the socket, while the
//! reader loop feeds text frames to [`ChatHandler::on_message`] one at a time.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::backend::chat::connection::{Connection, SocketConnection};
use crate::backend::chat::handler::ChatHandler;

/// Query parameters accepted on the chat upgrade request
#[derive(Debug, Default, Deserialize)]
pub struct ChatQuery {
    pub username: Option<String>,
}

/// GET /chat
pub async fn chat_upgrade(
    State(handler): State<ChatHandler>,
    Query(query): Query<ChatQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let username = query
        .username
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "Guest".to_string());

    ws.on_upgrade(move |socket| run_connection(socket, handler, username))
}

/// Drive one chat connection until the client goes away
pub async fn run_connection(socket: WebSocket, handler: ChatHandler, username: String) {
    let (ws_sender, mut ws_receiver) = socket.split();
    let (connection, rx) = SocketConnection::new(username);
    let connection = Arc::new(connection);
    let id = connection.id();

    let writer_handle = tokio::spawn(writer_task(ws_sender, rx));

    tracing::info!("[Chat] {} connected as {}", connection.username(), id);
    handler.on_connect(connection.clone()).await;

    while let Some(frame) = ws_receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                if let Err(e) = handler.on_message(&*connection, text.as_str()).await {
                    handler.report_error(&*connection, &e);
                }
            }
            Ok(Message::Close(frame)) => {
                tracing::debug!("[Chat] {} sent close: {:?}", id, frame);
                break;
            }
            Ok(Message::Binary(_)) => {
                tracing::debug!("[Chat] Ignoring binary frame from {}", id);
            }
            // Pings are answered by axum
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("[Chat] Receive error on {}: {}", id, e);
                break;
            }
        }
    }

    handler.on_disconnect(id);
    writer_handle.abort();
    tracing::info!("[Chat] {} ({}) disconnected", connection.username(), id);
}

async fn writer_task(
    mut ws_sender: futures_util::stream::SplitSink<WebSocket, Message>,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    while let Some(payload) = rx.recv().await {
        if ws_sender.send(Message::Text(payload.into())).await.is_err() {
            break;
        }
    }
}
