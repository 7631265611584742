//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use super::{MessageDto, UserDto};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful register/login response: the issued session token and the
/// bound user.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user: UserDto,
}

/// Short human-readable reason for credential failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// History fetch response for `GET /api/rooms/{room}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct RoomMessagesResponse {
    pub messages: Vec<MessageDto>,
}
