//! Conversion logic between DTOs and domain entities.

use crate::common::time::timestamp_to_rfc3339;
use crate::domain::{StoredMessage, User};

use super::{MessageDto, UserDto};

// ========================================
// Domain Entity -> DTO
// ========================================

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            username: user.username,
            display_name: user.display_name,
        }
    }
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        user.clone().into()
    }
}

impl From<StoredMessage> for MessageDto {
    fn from(message: StoredMessage) -> Self {
        Self {
            id: message.id.value(),
            content: message.content.into_string(),
            room: message.room.into_string(),
            receiver_id: message.receiver_id.map(|id| id.value()),
            created_at: timestamp_to_rfc3339(message.created_at.value()),
            sender: message.sender.into(),
        }
    }
}
