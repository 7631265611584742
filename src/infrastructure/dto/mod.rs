//! Data Transfer Objects (DTOs) for the chat service.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs
//! - `http`: HTTP API request/response DTOs
//!
//! `UserDto` and `MessageDto` live here because live events and history
//! replay share one message shape.

pub mod conversion;
pub mod http;
pub mod websocket;

use serde::{Deserialize, Serialize};

/// Wire shape of a user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

/// Wire shape of a chat message, used both for live `message` events and
/// for history replay. `created_at` is RFC 3339 UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: i64,
    pub content: String,
    pub room: String,
    pub receiver_id: Option<i64>,
    pub created_at: String,
    pub sender: UserDto,
}
