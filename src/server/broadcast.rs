//! Connection registry and fan-out.
//!
//! Owns the set of live WebSocket connections. Delivery goes through a
//! per-connection unbounded channel; the socket task on the other end
//! does the actual network write. A send fails only once that task has
//! gone away, which is how dead sockets are detected lazily.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::mpsc;

/// Opaque handle to one live connection.
pub type ConnectionId = u64;

type ConnectionSet = HashMap<ConnectionId, mpsc::UnboundedSender<String>>;

/// Tracks live connections and fans messages out to all of them.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    connections: Mutex<ConnectionSet>,
    next_id: AtomicU64,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ConnectionSet> {
        self.connections.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Registers a new connection and returns its handle plus the
    /// receiving end of its delivery channel.
    ///
    /// The `sync` payload is enqueued before the sender becomes visible
    /// to broadcasters, all under one lock acquisition, so the client is
    /// guaranteed to see the sync message before any later broadcast.
    pub fn connect(&self, sync: String) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        let mut connections = self.lock();
        // The receiver is still held right here, so this cannot fail.
        let _ = tx.send(sync);
        connections.insert(id, tx);

        (id, rx)
    }

    /// Removes a connection. Removing an absent handle is a no-op.
    pub fn disconnect(&self, id: ConnectionId) {
        self.lock().remove(&id);
    }

    /// Delivers `message` to every connection in a snapshot of the
    /// current set. A failed delivery removes that connection and never
    /// interrupts delivery to the rest.
    pub fn broadcast(&self, message: &str) {
        let snapshot: Vec<(ConnectionId, mpsc::UnboundedSender<String>)> = self
            .lock()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut dead = Vec::new();
        for (id, tx) in snapshot {
            if tx.send(message.to_string()).is_err() {
                dead.push(id);
            }
        }

        if !dead.is_empty() {
            let mut connections = self.lock();
            for id in dead {
                connections.remove(&id);
                tracing::debug!(connection = id, "removed dead connection during broadcast");
            }
        }
    }

    pub fn connection_count(&self) -> usize {
        self.lock().len()
    }
}
