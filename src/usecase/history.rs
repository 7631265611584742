//! UseCase: room history fetch.

use std::sync::Arc;

use crate::domain::{DEFAULT_HISTORY_LIMIT, MessageStore, RoomId, StoreError, StoredMessage};

/// Replay of a room's persisted messages, oldest first.
pub struct RoomHistoryUseCase {
    store: Arc<dyn MessageStore>,
}

impl RoomHistoryUseCase {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Fetch up to [`DEFAULT_HISTORY_LIMIT`] messages for a room. A blank
    /// room name falls back to the default room, mirroring the dispatcher.
    pub async fn execute(&self, room: &str) -> Result<Vec<StoredMessage>, StoreError> {
        let room = RoomId::new(room).unwrap_or_else(|_| RoomId::global());
        self.store.list_by_room(&room, DEFAULT_HISTORY_LIMIT).await
    }
}
