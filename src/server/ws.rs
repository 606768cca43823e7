//! WebSocket handler for real-time state updates.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::server::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handles an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Register the connection with the current device state as its sync
    // message, so the client starts synchronized no matter when it joins.
    let sync = match serde_json::to_string(&state.device.get()) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(?e, "failed to serialize device state for sync");
            return;
        }
    };
    let (id, mut rx) = state.connections.connect(sync);
    tracing::debug!(connection = id, "websocket client connected");

    // Forward queued payloads to the socket until the client goes away.
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // Drain inbound frames; clients only listen, but Close must be seen.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    // Wait for either task to complete, then stop the other.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.connections.disconnect(id);
    tracing::debug!(connection = id, "websocket connection closed");
}
