//! UseCase: presence broadcast.
//!
//! Recomputes the deduplicated online-user list and pushes it to every
//! connection as a full-replace snapshot. Fired synchronously after every
//! successful register and deregister; no debouncing, a connect/disconnect
//! storm produces one broadcast per event.

use std::sync::Arc;

use crate::infrastructure::dto::websocket::{EventType, PresenceEvent};
use crate::infrastructure::{ConnectionRegistry, RoomRouter};

/// Full-replace `user:online` snapshot fanout.
pub struct PresenceBroadcastUseCase {
    registry: Arc<ConnectionRegistry>,
    router: Arc<RoomRouter>,
}

impl PresenceBroadcastUseCase {
    pub fn new(registry: Arc<ConnectionRegistry>, router: Arc<RoomRouter>) -> Self {
        Self { registry, router }
    }

    /// Send the current presence snapshot to every connected connection,
    /// regardless of room.
    pub async fn broadcast(&self) {
        let users = self.registry.users_online().await;
        let event = PresenceEvent {
            r#type: EventType::UserOnline,
            users: users.iter().map(Into::into).collect(),
        };
        let payload = serde_json::to_string(&event).unwrap();

        let targets = self.registry.connection_ids().await;
        self.router.send_to_connections(&targets, &payload).await;
        tracing::debug!("Broadcasted presence snapshot ({} online)", users.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, User, UserId};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_snapshot_reaches_every_connection_in_any_room() {
        // given (precondition): two users, one of them with two devices
        let registry = Arc::new(ConnectionRegistry::new());
        let router = Arc::new(RoomRouter::new(registry.clone()));
        let usecase = PresenceBroadcastUseCase::new(registry.clone(), router);

        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        registry
            .register(ConnectionId::generate(), User::new(UserId::new(1), "alice", "Alice"), tx1)
            .await;
        registry
            .register(ConnectionId::generate(), User::new(UserId::new(1), "alice", "Alice"), tx2)
            .await;
        registry
            .register(ConnectionId::generate(), User::new(UserId::new(2), "bob", "Bob"), tx3)
            .await;

        // when (operation):
        usecase.broadcast().await;

        // then (expected result): all three connections get a deduplicated,
        // full-replace list
        for rx in [&mut rx1, &mut rx2, &mut rx3] {
            let payload = rx.recv().await.unwrap();
            let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
            assert_eq!(json["type"], "user:online");
            assert_eq!(json["users"].as_array().unwrap().len(), 2);
            assert_eq!(json["users"][0]["id"], 1);
            assert_eq!(json["users"][1]["id"], 2);
        }
    }

    #[tokio::test]
    async fn test_snapshot_with_no_connections_is_noop() {
        // given (precondition):
        let registry = Arc::new(ConnectionRegistry::new());
        let router = Arc::new(RoomRouter::new(registry.clone()));
        let usecase = PresenceBroadcastUseCase::new(registry, router);

        // when (operation):
        usecase.broadcast().await;

        // then (expected result): nothing to assert beyond "no panic"
    }
}
