use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::AppState;

/// WebSocket handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle one WebSocket connection for its whole lifetime: register it with
/// the hub, pump broadcasts out and interaction events in, then unregister.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = Uuid::new_v4();

    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
    state.hub.register(connection_id, outbound_tx).await;

    let (mut sender, mut receiver) = socket.split();

    // Drain this connection's outbound channel into the socket.
    let mut send_task = tokio::spawn(async move {
        while let Some(json) = outbound_rx.recv().await {
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    // Relay inbound interaction events to the controller.
    let relay = state.relay.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => relay.on_message(&text),
                Ok(Message::Binary(bytes)) => {
                    if let Ok(text) = String::from_utf8(bytes) {
                        relay.on_message(&text);
                    }
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    debug!(connection_id = %connection_id, err = %e, "websocket transport error");
                    break;
                }
            }
        }
    });

    // Wait for either task to finish (and finish the other)
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    };

    state.hub.unregister(connection_id).await;
}
