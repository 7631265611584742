//! Application use cases.
//!
//! One struct per operation; each holds `Arc`s of the registries and
//! capability traits it needs, so every use case is testable without a
//! live transport.

pub mod connect;
pub mod disconnect;
pub mod error;
pub mod history;
pub mod presence;
pub mod send_message;
pub mod typing;

pub use connect::ConnectUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{ConnectError, SendMessageError, TypingError};
pub use history::RoomHistoryUseCase;
pub use presence::PresenceBroadcastUseCase;
pub use send_message::{InboundMessage, SendMessageUseCase};
pub use typing::TypingUseCase;
