//! MessageStore capability trait.
//!
//! Durable append-only log of messages. The storage engine itself is an
//! external collaborator; the core depends only on this interface.

use async_trait::async_trait;

use super::entity::{NewMessage, StoredMessage};
use super::error::StoreError;
use super::value_object::RoomId;

/// Default number of messages returned by a history fetch.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Append-only message log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a message. The store assigns the monotonic id and the
    /// authoritative `created_at` timestamp.
    async fn append(&self, message: NewMessage) -> Result<StoredMessage, StoreError>;

    /// List up to `limit` messages for a room, oldest first.
    async fn list_by_room(
        &self,
        room: &RoomId,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, StoreError>;
}
