//! UseCase: message dispatch.
//!
//! Validates an inbound message event, persists it, and routes the
//! outbound event. Delivery is mutually exclusive on `receiver_id`:
//! private messages go to the receiver's connections plus an echo to the
//! sending connection; everything else is a room broadcast that includes
//! the sender. No registry lock is held across the store await.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessageContent, MessageStore, NewMessage, RoomId, StoredMessage, UserId};
use crate::infrastructure::dto::websocket::{ChatMessageEvent, EventType};
use crate::infrastructure::{ConnectionRegistry, RoomRouter};

use super::error::SendMessageError;

/// Inbound `message` event payload, as decoded from the wire.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub content: String,
    pub room: Option<String>,
    pub receiver_id: Option<i64>,
}

/// Validate, persist, and deliver one chat message.
pub struct SendMessageUseCase {
    registry: Arc<ConnectionRegistry>,
    router: Arc<RoomRouter>,
    store: Arc<dyn MessageStore>,
}

impl SendMessageUseCase {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        router: Arc<RoomRouter>,
        store: Arc<dyn MessageStore>,
    ) -> Self {
        Self {
            registry,
            router,
            store,
        }
    }

    /// Handle an inbound message from a connection.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(StoredMessage))` - persisted and delivered
    /// * `Ok(None)` - empty content, silently dropped (no persistence, no
    ///   outbound event; empty sends are common client races and must
    ///   never appear in history)
    /// * `Err(SendMessageError)` - unregistered connection or store
    ///   failure; the caller logs and drops (fire-and-forget)
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        inbound: InboundMessage,
    ) -> Result<Option<StoredMessage>, SendMessageError> {
        let sender = self
            .registry
            .user_for(connection_id)
            .await
            .ok_or(SendMessageError::Unauthenticated)?;

        let content = match MessageContent::new(inbound.content) {
            Ok(content) => content,
            Err(_) => {
                tracing::debug!(
                    "Dropping empty message from connection '{}'",
                    connection_id
                );
                return Ok(None);
            }
        };

        // absent or blank room falls back to the default
        let room = inbound
            .room
            .and_then(|raw| RoomId::new(raw).ok())
            .unwrap_or_else(RoomId::global);
        let receiver_id = inbound.receiver_id.map(UserId::new);

        let stored = self
            .store
            .append(NewMessage {
                sender,
                receiver_id,
                room,
                content,
            })
            .await?;

        let event = ChatMessageEvent {
            r#type: EventType::Message,
            message: stored.clone().into(),
        };
        let payload = serde_json::to_string(&event).unwrap();

        match stored.receiver_id {
            Some(receiver_id) => {
                // private: receiver's connections plus echo to the sender's
                // own connection, never the room
                let mut targets = self.registry.connections_for_user(receiver_id).await;
                if !targets.contains(connection_id) {
                    targets.push(*connection_id);
                }
                self.router.send_to_connections(&targets, &payload).await;
            }
            None => {
                // room broadcast, sender included
                self.router
                    .broadcast_to_room(&stored.room, &payload, None)
                    .await;
            }
        }

        Ok(Some(stored))
    }
}
