//! Room router: membership and fanout.
//!
//! Holds the room -> connection-set map and performs delivery through the
//! [`ConnectionRegistry`]'s outbound channels. Membership is read under the
//! router's own lock, then the lock is released before delivery, so a
//! broadcast observes the membership at the moment of the call
//! (last-write-wins with racing joins, as the contract allows).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomId};

use super::registry::ConnectionRegistry;

/// Room membership and event fanout.
///
/// Rooms are implicitly created on first join and pruned when the last
/// member leaves.
pub struct RoomRouter {
    registry: Arc<ConnectionRegistry>,
    rooms: Mutex<HashMap<RoomId, HashSet<ConnectionId>>>,
}

impl RoomRouter {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            registry,
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Join a connection to a room, creating the room if needed.
    pub async fn join(&self, connection_id: ConnectionId, room: RoomId) {
        let mut rooms = self.rooms.lock().await;
        rooms.entry(room.clone()).or_default().insert(connection_id);
        tracing::debug!("Connection '{}' joined room '{}'", connection_id, room);
    }

    /// Remove a connection from a room. Unknown rooms/members are a no-op.
    pub async fn leave(&self, connection_id: &ConnectionId, room: &RoomId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(members) = rooms.get_mut(room) {
            members.remove(connection_id);
            if members.is_empty() {
                rooms.remove(room);
            }
        }
    }

    /// Remove a connection from every room it was joined to (disconnect path).
    pub async fn leave_all(&self, connection_id: &ConnectionId) {
        let mut rooms = self.rooms.lock().await;
        rooms.retain(|_, members| {
            members.remove(connection_id);
            !members.is_empty()
        });
    }

    /// Connections currently joined to a room.
    pub async fn members(&self, room: &RoomId) -> Vec<ConnectionId> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Deliver a payload to every connection joined to the room at the
    /// moment of the call, optionally excluding one connection.
    pub async fn broadcast_to_room(
        &self,
        room: &RoomId,
        payload: &str,
        exclude: Option<&ConnectionId>,
    ) {
        let targets: Vec<ConnectionId> = {
            let rooms = self.rooms.lock().await;
            match rooms.get(room) {
                Some(members) => members
                    .iter()
                    .filter(|id| exclude != Some(*id))
                    .copied()
                    .collect(),
                None => return,
            }
        };
        self.registry.send_to(&targets, payload).await;
    }

    /// Deliver a payload to an explicit set of connections (private
    /// messages, presence snapshots).
    pub async fn send_to_connections(&self, targets: &[ConnectionId], payload: &str) {
        self.registry.send_to(targets, payload).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserId};
    use tokio::sync::mpsc::UnboundedReceiver;

    struct Member {
        id: ConnectionId,
        rx: UnboundedReceiver<String>,
    }

    async fn connect(registry: &ConnectionRegistry, user_id: i64, name: &str) -> Member {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let id = ConnectionId::generate();
        registry
            .register(id, User::new(UserId::new(user_id), name, name), tx)
            .await;
        Member { id, rx }
    }

    #[tokio::test]
    async fn test_broadcast_reaches_only_room_members() {
        // given (precondition): alice and bob in "global", carol in "other"
        let registry = Arc::new(ConnectionRegistry::new());
        let router = RoomRouter::new(registry.clone());
        let mut alice = connect(&registry, 1, "alice").await;
        let mut bob = connect(&registry, 2, "bob").await;
        let mut carol = connect(&registry, 3, "carol").await;
        router.join(alice.id, RoomId::global()).await;
        router.join(bob.id, RoomId::global()).await;
        router.join(carol.id, RoomId::new("other").unwrap()).await;

        // when (operation):
        router
            .broadcast_to_room(&RoomId::global(), "hello", None)
            .await;

        // then (expected result): room members receive, carol does not
        assert_eq!(alice.rx.recv().await, Some("hello".to_string()));
        assert_eq!(bob.rx.recv().await, Some("hello".to_string()));
        assert!(carol.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_excludes_given_connection() {
        // given (precondition):
        let registry = Arc::new(ConnectionRegistry::new());
        let router = RoomRouter::new(registry.clone());
        let mut alice = connect(&registry, 1, "alice").await;
        let mut bob = connect(&registry, 2, "bob").await;
        router.join(alice.id, RoomId::global()).await;
        router.join(bob.id, RoomId::global()).await;

        // when (operation): broadcast excluding alice (typing relay shape)
        router
            .broadcast_to_room(&RoomId::global(), "typing", Some(&alice.id))
            .await;

        // then (expected result):
        assert_eq!(bob.rx.recv().await, Some("typing".to_string()));
        assert!(alice.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_to_unknown_room_is_noop() {
        // given (precondition):
        let registry = Arc::new(ConnectionRegistry::new());
        let router = RoomRouter::new(registry.clone());
        let mut alice = connect(&registry, 1, "alice").await;
        router.join(alice.id, RoomId::global()).await;

        // when (operation):
        router
            .broadcast_to_room(&RoomId::new("nowhere").unwrap(), "lost", None)
            .await;

        // then (expected result):
        assert!(alice.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_leave_all_removes_connection_from_every_room() {
        // given (precondition): alice joined two rooms
        let registry = Arc::new(ConnectionRegistry::new());
        let router = RoomRouter::new(registry.clone());
        let alice = connect(&registry, 1, "alice").await;
        let side = RoomId::new("side").unwrap();
        router.join(alice.id, RoomId::global()).await;
        router.join(alice.id, side.clone()).await;

        // when (operation):
        router.leave_all(&alice.id).await;

        // then (expected result): both rooms no longer list alice
        assert!(router.members(&RoomId::global()).await.is_empty());
        assert!(router.members(&side).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_room_is_pruned_on_leave() {
        // given (precondition):
        let registry = Arc::new(ConnectionRegistry::new());
        let router = RoomRouter::new(registry.clone());
        let alice = connect(&registry, 1, "alice").await;
        let room = RoomId::new("ephemeral").unwrap();
        router.join(alice.id, room.clone()).await;

        // when (operation):
        router.leave(&alice.id, &room).await;

        // then (expected result): room map no longer holds the key
        let rooms = router.rooms.lock().await;
        assert!(!rooms.contains_key(&room));
    }

    #[tokio::test]
    async fn test_send_to_connections_targets_explicit_set() {
        // given (precondition): three connections, only two targeted
        let registry = Arc::new(ConnectionRegistry::new());
        let router = RoomRouter::new(registry.clone());
        let mut alice = connect(&registry, 1, "alice").await;
        let mut bob = connect(&registry, 2, "bob").await;
        let mut carol = connect(&registry, 3, "carol").await;

        // when (operation):
        router
            .send_to_connections(&[alice.id, bob.id], "private")
            .await;

        // then (expected result):
        assert_eq!(alice.rx.recv().await, Some("private".to_string()));
        assert_eq!(bob.rx.recv().await, Some("private".to_string()));
        assert!(carol.rx.try_recv().is_err());
    }
}
