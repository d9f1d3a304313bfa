//! WebSocket Connection Handler
//!
//! Upgrades HTTP requests and hands each socket to the relay's connection loop.

use std::sync::Arc;

use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::Response,
};

use super::transport;
use crate::domain::{ConnectionId, FrameSink};
use crate::startup::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let limits = &state.settings.websocket;

    ws.max_message_size(limits.max_message_size)
        .max_frame_size(limits.max_frame_size)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = ConnectionId::new();
    tracing::debug!(connection_id = %connection_id, "New WebSocket connection");

    let (source, sink) = transport::split(socket);
    let sink: Arc<dyn FrameSink> = Arc::new(sink);

    state.connections.run(connection_id, source, sink).await;

    tracing::debug!(connection_id = %connection_id, "WebSocket connection closed");
}
