//! Domain entities.

use super::value_object::{MessageContent, MessageId, RoomId, Timestamp, UserId};

/// A registered user. Created at registration (outside this core),
/// referenced by connections, never owned or mutated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
        }
    }
}

/// A message as handed to the store, before id/timestamp assignment.
///
/// A non-null `receiver_id` marks a private message: delivered only to the
/// sender's and the receiver's connections, never broadcast to the room.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender: User,
    pub receiver_id: Option<UserId>,
    pub room: RoomId,
    pub content: MessageContent,
}

/// A persisted message. Immutable once appended; this core never deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: MessageId,
    pub sender: User,
    pub receiver_id: Option<UserId>,
    pub room: RoomId,
    pub content: MessageContent,
    pub created_at: Timestamp,
}
