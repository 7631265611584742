//! Domain model: value objects, entities, capability traits and errors.
//!
//! This layer has no knowledge of transports or storage engines. The
//! capability traits (`AuthService`, `MessageStore`) are defined here and
//! implemented by the infrastructure layer (dependency inversion).

pub mod auth;
pub mod entity;
pub mod error;
pub mod store;
pub mod value_object;

pub use auth::{AuthService, AuthSession};
pub use entity::{NewMessage, StoredMessage, User};
pub use error::{AuthError, StoreError};
pub use store::{DEFAULT_HISTORY_LIMIT, MessageStore};
pub use value_object::{ConnectionId, MessageContent, MessageId, RoomId, Timestamp, UserId};
