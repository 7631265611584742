//! WebSocket event DTOs.
//!
//! Every server-to-client event carries a `type` tag; client-to-server
//! events are a tagged enum over the same field.

use serde::{Deserialize, Serialize};

use super::{MessageDto, UserDto};

/// Event discriminator carried in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "message")]
    Message,
    #[serde(rename = "user:online")]
    UserOnline,
    #[serde(rename = "typing")]
    Typing,
    #[serde(rename = "unauthorized")]
    Unauthorized,
}

/// Server -> client: a delivered chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageEvent {
    pub r#type: EventType,
    #[serde(flatten)]
    pub message: MessageDto,
}

/// Server -> client: full-replace presence snapshot.
///
/// Clients discard their previous list; this is not a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEvent {
    pub r#type: EventType,
    pub users: Vec<UserDto>,
}

/// Server -> client: someone is typing in a room the client is in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingEvent {
    pub r#type: EventType,
    pub user: UserDto,
}

/// Server -> client: handshake carried no valid session; sent once, then
/// the connection is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnauthorizedEvent {
    pub r#type: EventType,
}

impl UnauthorizedEvent {
    pub fn new() -> Self {
        Self {
            r#type: EventType::Unauthorized,
        }
    }
}

impl Default for UnauthorizedEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Client -> server events.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Send a message to a room, or privately when `receiver_id` is set.
    #[serde(rename = "message")]
    Message {
        content: String,
        room: Option<String>,
        receiver_id: Option<i64>,
    },
    /// Ephemeral typing signal for a room.
    #[serde(rename = "typing")]
    Typing { room: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_event_deserializes() {
        // given (precondition):
        let raw = r#"{"type":"message","content":"hi","room":"global","receiver_id":2}"#;

        // when (operation):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (expected result):
        assert_eq!(
            event,
            ClientEvent::Message {
                content: "hi".to_string(),
                room: Some("global".to_string()),
                receiver_id: Some(2),
            }
        );
    }

    #[test]
    fn test_client_message_event_optional_fields_default() {
        // given (precondition): room and receiver omitted
        let raw = r#"{"type":"message","content":"hi"}"#;

        // when (operation):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (expected result):
        assert_eq!(
            event,
            ClientEvent::Message {
                content: "hi".to_string(),
                room: None,
                receiver_id: None,
            }
        );
    }

    #[test]
    fn test_client_typing_event_deserializes() {
        // given (precondition):
        let raw = r#"{"type":"typing","room":"global"}"#;

        // when (operation):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (expected result):
        assert_eq!(
            event,
            ClientEvent::Typing {
                room: Some("global".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        // given (precondition):
        let raw = r#"{"type":"upload","content":"x"}"#;

        // when (operation):
        let result = serde_json::from_str::<ClientEvent>(raw);

        // then (expected result):
        assert!(result.is_err());
    }

    #[test]
    fn test_presence_event_serializes_with_colon_tag() {
        // given (precondition):
        let event = PresenceEvent {
            r#type: EventType::UserOnline,
            users: vec![UserDto {
                id: 1,
                username: "alice".to_string(),
                display_name: "Alice".to_string(),
            }],
        };

        // when (operation):
        let json = serde_json::to_value(&event).unwrap();

        // then (expected result):
        assert_eq!(json["type"], "user:online");
        assert_eq!(json["users"][0]["username"], "alice");
    }

    #[test]
    fn test_chat_message_event_flattens_message_fields() {
        // given (precondition):
        let event = ChatMessageEvent {
            r#type: EventType::Message,
            message: MessageDto {
                id: 7,
                content: "hi".to_string(),
                room: "global".to_string(),
                receiver_id: None,
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
                sender: UserDto {
                    id: 1,
                    username: "alice".to_string(),
                    display_name: "Alice".to_string(),
                },
            },
        };

        // when (operation):
        let json = serde_json::to_value(&event).unwrap();

        // then (expected result): message fields sit at the top level
        assert_eq!(json["type"], "message");
        assert_eq!(json["id"], 7);
        assert_eq!(json["room"], "global");
        assert_eq!(json["receiver_id"], serde_json::Value::Null);
        assert_eq!(json["sender"]["id"], 1);
    }
}
