//! Connection registry: the source of truth for who is online.
//!
//! Maps each live connection to its authenticated user and its outbound
//! channel. This is one of the two shared mutable structures in the core
//! (the other is the room membership map in [`super::router`]); every
//! mutation and snapshot read is serialized behind a single lock, and the
//! lock is never held across a persistence or auth await.

use std::collections::{BTreeMap, HashMap};

use tokio::sync::{Mutex, mpsc};

use crate::domain::{ConnectionId, User, UserId};

/// Per-connection outbound channel.
///
/// Unbounded and FIFO: the websocket pusher loop drains it, so two events
/// queued in order are delivered to a still-open connection in that order.
/// Sends to a closed connection fail and are logged, never propagated.
pub type OutboundSender = mpsc::UnboundedSender<String>;

struct ConnectionEntry {
    user: User,
    sender: OutboundSender,
}

/// Registry of live, authenticated connections.
///
/// State is in-memory only: on process restart every user appears offline
/// until they reconnect.
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, ConnectionEntry>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Register a connection under its authenticated user.
    pub async fn register(&self, connection_id: ConnectionId, user: User, sender: OutboundSender) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection_id, ConnectionEntry { user, sender });
        tracing::debug!("Connection '{}' registered", connection_id);
    }

    /// Remove a connection. Idempotent: deregistering an unknown or
    /// already-removed connection is a no-op. Returns whether an entry was
    /// actually removed, so callers can skip redundant presence broadcasts.
    pub async fn deregister(&self, connection_id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(connection_id).is_some();
        if removed {
            tracing::debug!("Connection '{}' deregistered", connection_id);
        }
        removed
    }

    /// The user bound to a connection, if it is registered.
    pub async fn user_for(&self, connection_id: &ConnectionId) -> Option<User> {
        let connections = self.connections.lock().await;
        connections.get(connection_id).map(|entry| entry.user.clone())
    }

    /// Deduplicated presence snapshot, sorted by user id.
    ///
    /// A user with several concurrent connections appears exactly once.
    pub async fn users_online(&self) -> Vec<User> {
        let connections = self.connections.lock().await;
        let mut by_id: BTreeMap<UserId, User> = BTreeMap::new();
        for entry in connections.values() {
            by_id.entry(entry.user.id).or_insert_with(|| entry.user.clone());
        }
        by_id.into_values().collect()
    }

    /// All connections currently belonging to a user (0 or more).
    pub async fn connections_for_user(&self, user_id: UserId) -> Vec<ConnectionId> {
        let connections = self.connections.lock().await;
        connections
            .iter()
            .filter(|(_, entry)| entry.user.id == user_id)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Every registered connection id.
    pub async fn connection_ids(&self) -> Vec<ConnectionId> {
        let connections = self.connections.lock().await;
        connections.keys().copied().collect()
    }

    /// Push a payload to each target connection's outbound channel.
    ///
    /// Targets that are gone or whose channel is closed are skipped with a
    /// log line; partial failure never aborts the remaining sends.
    pub async fn send_to(&self, targets: &[ConnectionId], payload: &str) {
        let connections = self.connections.lock().await;
        for target in targets {
            match connections.get(target) {
                Some(entry) => {
                    if entry.sender.send(payload.to_string()).is_err() {
                        tracing::warn!("Failed to push to connection '{}': channel closed", target);
                    }
                }
                None => {
                    tracing::debug!("Connection '{}' gone during send, skipping", target);
                }
            }
        }
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
