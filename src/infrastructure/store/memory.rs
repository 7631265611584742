//! In-memory MessageStore implementation.
//!
//! A `Vec` in append order doubles as the time-ascending log. The store
//! assigns monotonic ids and stamps each message with its own clock; the
//! server clock is authoritative, client timestamps are never stored.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::common::time::{Clock, SystemClock};
use crate::domain::{MessageId, MessageStore, NewMessage, RoomId, StoreError, StoredMessage, Timestamp};

struct LogInner {
    messages: Vec<StoredMessage>,
    next_id: i64,
}

/// In-memory append-only message log.
pub struct InMemoryMessageStore {
    clock: Arc<dyn Clock>,
    inner: Mutex<LogInner>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store with an injected clock (tests use `FixedClock`).
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Mutex::new(LogInner {
                messages: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: NewMessage) -> Result<StoredMessage, StoreError> {
        let mut inner = self.inner.lock().await;
        let stored = StoredMessage {
            id: MessageId::new(inner.next_id),
            sender: message.sender,
            receiver_id: message.receiver_id,
            room: message.room,
            content: message.content,
            created_at: Timestamp::new(self.clock.now_utc_millis()),
        };
        inner.next_id += 1;
        inner.messages.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_room(
        &self,
        room: &RoomId,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .messages
            .iter()
            .filter(|message| &message.room == room)
            .take(limit)
            .cloned()
            .collect())
    }
}
