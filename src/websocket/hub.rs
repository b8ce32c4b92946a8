use std::collections::HashMap;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::OutboundMessage;

/// Owns the set of live WebSocket connections.
///
/// Each connection registers the sender half of its outbound channel; the
/// matching receiver is drained by that connection's send task, so delivery
/// to a single connection follows send order. A send that fails means the
/// connection already tore down its channel — it is skipped, and its removal
/// happens on its own close path.
pub struct ConnectionHub {
    clients: Mutex<HashMap<Uuid, mpsc::UnboundedSender<String>>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Add a connection to the live set.
    pub async fn register(&self, connection_id: Uuid, sender: mpsc::UnboundedSender<String>) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        info!(connection_id = %connection_id, clients = clients.len(), "browser connected");
    }

    /// Remove a connection from the live set. Safe to call more than once
    /// for the same connection.
    pub async fn unregister(&self, connection_id: Uuid) {
        let mut clients = self.clients.lock().await;
        if clients.remove(&connection_id).is_some() {
            info!(connection_id = %connection_id, clients = clients.len(), "browser disconnected");
        }
    }

    /// Send `message` to every live connection.
    ///
    /// The message is serialized once. Failures are isolated per connection
    /// and never abort delivery to the rest of the set.
    pub async fn broadcast(&self, message: &OutboundMessage) {
        let json = serde_json::to_string(message).expect("outbound messages always serialize");

        let clients = self.clients.lock().await;
        for (connection_id, sender) in clients.iter() {
            if sender.send(json.clone()).is_err() {
                debug!(connection_id = %connection_id, "skipping closed connection");
            }
        }
    }

    /// Number of live connections.
    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}

impl Default for ConnectionHub {
    fn default() -> Self {
        Self::new()
    }
}
