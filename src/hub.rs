//! Fan-out of live board updates to every connected client.
//!
//! Each open connection holds a [`Subscription`]. A message published on the
//! [`BroadcastHub`] is queued to every registered subscription, the sender's
//! included. Recipients whose queue is gone are dropped from the hub without
//! affecting delivery to the rest.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use uuid::Uuid;

pub type ConnectionId = Uuid;

/// Broadcast text is allocated once and shared by every recipient
type Outbox = mpsc::UnboundedSender<Arc<str>>;

/// Registry of open live connections
#[derive(Clone, Default)]
pub struct BroadcastHub {
    connections: Arc<RwLock<HashMap<ConnectionId, Outbox>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection and hand back its receiving end.
    pub fn subscribe(&self) -> Subscription {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.write().insert(id, tx);
        tracing::debug!(connection_id = %id, "live connection registered");

        Subscription {
            id,
            hub: self.clone(),
            inbox: rx,
        }
    }

    /// Remove a connection. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: ConnectionId) -> bool {
        let removed = self.connections.write().remove(&id).is_some();
        if removed {
            tracing::debug!(connection_id = %id, "live connection unregistered");
        }
        removed
    }

    /// Queue `message` for every registered connection.
    ///
    /// Returns the number of connections it was delivered to.
    pub fn broadcast(&self, message: &str) -> usize {
        // Snapshot so the lock is not held while delivering
        let recipients: Vec<(ConnectionId, Outbox)> = self
            .connections
            .read()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let shared: Arc<str> = Arc::from(message);
        let mut delivered = 0;
        let mut dead = Vec::new();
        for (id, tx) in recipients {
            match tx.send(Arc::clone(&shared)) {
                Ok(()) => delivered += 1,
                Err(_) => dead.push(id),
            }
        }

        for id in dead {
            if self.unsubscribe(id) {
                tracing::info!(connection_id = %id, "dropped unreachable live connection");
            }
        }

        delivered
    }

    pub fn connection_count(&self) -> usize {
        self.connections.read().len()
    }

    pub fn is_registered(&self, id: ConnectionId) -> bool {
        self.connections.read().contains_key(&id)
    }
}

/// Receiving side of one live connection.
///
/// Dropping it unregisters the connection from the hub.
pub struct Subscription {
    id: ConnectionId,
    hub: BroadcastHub,
    inbox: mpsc::UnboundedReceiver<Arc<str>>,
}

impl Subscription {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Next message broadcast to this connection.
    ///
    /// `None` once the hub has dropped this connection.
    pub async fn recv(&mut self) -> Option<Arc<str>> {
        self.inbox.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}
