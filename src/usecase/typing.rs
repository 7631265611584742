//! UseCase: typing relay.
//!
//! Relays an ephemeral typing signal from one connection to the rest of
//! its room. Nothing is persisted, nothing is rate limited; clearing the
//! indicator after a timeout is a client-side presentation concern.

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomId};
use crate::infrastructure::dto::websocket::{EventType, TypingEvent};
use crate::infrastructure::{ConnectionRegistry, RoomRouter};

use super::error::TypingError;

/// Ephemeral typing-signal fanout.
pub struct TypingUseCase {
    registry: Arc<ConnectionRegistry>,
    router: Arc<RoomRouter>,
}

impl TypingUseCase {
    pub fn new(registry: Arc<ConnectionRegistry>, router: Arc<RoomRouter>) -> Self {
        Self { registry, router }
    }

    /// Relay a typing signal to everyone else in the room. The sender
    /// never receives its own echo.
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room: Option<String>,
    ) -> Result<(), TypingError> {
        let user = self
            .registry
            .user_for(connection_id)
            .await
            .ok_or(TypingError::Unauthenticated)?;

        let room = room
            .and_then(|raw| RoomId::new(raw).ok())
            .unwrap_or_else(RoomId::global);

        let event = TypingEvent {
            r#type: EventType::Typing,
            user: user.into(),
        };
        let payload = serde_json::to_string(&event).unwrap();
        self.router
            .broadcast_to_room(&room, &payload, Some(connection_id))
            .await;
        Ok(())
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

    async fn connect(
        registry: &ConnectionRegistry,
        router: &RoomRouter,
        user_id: i64,
        name: &str,
        room: &RoomId,
    ) -> Member {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let id = ConnectionId::generate();
        registry
            .register(id, User::new(UserId::new(user_id), name, name), tx)
            .await;
        router.join(id, room.clone()).await;
        Member { id, rx }
    }

    fn setup() -> (Arc<ConnectionRegistry>, Arc<RoomRouter>, TypingUseCase) {
        let registry = Arc::new(ConnectionRegistry::new());
        let router = Arc::new(RoomRouter::new(registry.clone()));
        let usecase = TypingUseCase::new(registry.clone(), router.clone());
        (registry, router, usecase)
    }

    #[tokio::test]
    async fn test_typing_reaches_room_except_sender() {
        // given (precondition): alice and bob in "global", carol elsewhere
        let (registry, router, usecase) = setup();
        let global = RoomId::global();
        let mut alice = connect(&registry, &router, 1, "alice", &global).await;
        let mut bob = connect(&registry, &router, 2, "bob", &global).await;
        let mut carol =
            connect(&registry, &router, 3, "carol", &RoomId::new("other").unwrap()).await;

        // when (operation):
        usecase.execute(&alice.id, None).await.unwrap();

        // then (expected result): bob sees alice typing, alice and carol
        // see nothing
        let payload = bob.rx.recv().await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(json["type"], "typing");
        assert_eq!(json["user"]["username"], "alice");
        assert!(alice.rx.try_recv().is_err());
        assert!(carol.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_typing_from_unregistered_connection_is_rejected() {
        // given (precondition):
        let (_registry, _router, usecase) = setup();

        // when (operation):
        let result = usecase.execute(&ConnectionId::generate(), None).await;

        // then (expected result):
        assert_eq!(result.unwrap_err(), TypingError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_repeated_typing_signals_all_relayed() {
        // given (precondition): no deduplication is promised
        let (registry, router, usecase) = setup();
        let global = RoomId::global();
        let alice = connect(&registry, &router, 1, "alice", &global).await;
        let mut bob = connect(&registry, &router, 2, "bob", &global).await;

        // when (operation): three keystroke-driven signals
        for _ in 0..3 {
            usecase.execute(&alice.id, None).await.unwrap();
        }

        // then (expected result): bob receives all three
        for _ in 0..3 {
            assert!(bob.rx.recv().await.is_some());
        }
    }
}
