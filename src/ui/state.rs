//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::AuthService;
use crate::usecase::{
    ConnectUseCase, DisconnectUseCase, RoomHistoryUseCase, SendMessageUseCase, TypingUseCase,
};

/// Shared application state
pub struct AppState {
    /// AuthService (session issuance/resolution for the HTTP endpoints)
    pub auth: Arc<dyn AuthService>,
    /// Connection handshake use case
    pub connect_usecase: Arc<ConnectUseCase>,
    /// Connection teardown use case
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// Message dispatch use case
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// Typing relay use case
    pub typing_usecase: Arc<TypingUseCase>,
    /// Room history use case
    pub history_usecase: Arc<RoomHistoryUseCase>,
}
