//! Connection registry — tracks every live connection by ID.

use std::sync::Arc;

use dashmap::DashMap;

use super::handle::{ConnectionHandle, ConnectionId};

/// Thread-safe registry of all live connections.
///
/// Concurrent register/unregister storms must neither lose nor duplicate
/// entries; the concurrent map keys on the connection ID, which is minted
/// once per upgrade, so each ID maps to exactly one handle for its
/// lifetime.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection.
    pub fn register(&self, handle: Arc<ConnectionHandle>) {
        self.connections.insert(handle.id, handle);
    }

    /// Removes a connection, returning its handle if it was present.
    pub fn unregister(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.remove(conn_id).map(|(_, handle)| handle)
    }

    /// Looks up a connection by ID.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections
            .get(conn_id)
            .map(|entry| entry.value().clone())
    }

    /// Whether the connection is currently registered.
    pub fn contains(&self, conn_id: &ConnectionId) -> bool {
        self.connections.contains_key(conn_id)
    }

    /// Number of live connections.
    pub fn count(&self) -> usize {
        self.connections.len()
    }

    /// Snapshot of every live handle.
    pub fn all(&self) -> Vec<Arc<ConnectionHandle>> {
        self.connections
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
