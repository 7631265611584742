//! Validated value objects for the chat domain.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by value object constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("room id must not be empty")]
    EmptyRoomId,
    #[error("message content must not be empty after trimming")]
    EmptyContent,
}

/// Identity of a registered user, assigned at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle of a single live connection.
///
/// One user may hold many concurrent connections (multi-device); a
/// reconnecting client always gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a broadcast group. Rooms are pure grouping keys, not entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

/// The room every authenticated connection is joined to on connect.
pub const GLOBAL_ROOM: &str = "global";

impl RoomId {
    /// Create a room id from a raw string. Surrounding whitespace is
    /// trimmed; an empty result is rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValueObjectError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyRoomId);
        }
        Ok(Self(trimmed))
    }

    /// The default room.
    pub fn global() -> Self {
        Self(GLOBAL_ROOM.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty, trimmed chat message content.
///
/// Empty or whitespace-only input is rejected at construction; the
/// dispatcher turns that rejection into a silent no-op, so empty sends
/// never reach storage or the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValueObjectError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyContent);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Identity of a persisted message, assigned by the store, monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(i64);

impl MessageId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Unix timestamp in UTC milliseconds. The server clock is authoritative;
/// client-supplied timestamps are never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
