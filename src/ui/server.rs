//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::domain::AuthService;
use crate::usecase::{
    ConnectUseCase, DisconnectUseCase, RoomHistoryUseCase, SendMessageUseCase, TypingUseCase,
};

use super::{
    handler::{
        http::{health_check, login, logout, me, register, room_messages},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Chat service server.
///
/// Encapsulates the wired use cases and runs the axum router.
pub struct Server {
    auth: Arc<dyn AuthService>,
    connect_usecase: Arc<ConnectUseCase>,
    disconnect_usecase: Arc<DisconnectUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    typing_usecase: Arc<TypingUseCase>,
    history_usecase: Arc<RoomHistoryUseCase>,
}

impl Server {
    pub fn new(
        auth: Arc<dyn AuthService>,
        connect_usecase: Arc<ConnectUseCase>,
        disconnect_usecase: Arc<DisconnectUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        typing_usecase: Arc<TypingUseCase>,
        history_usecase: Arc<RoomHistoryUseCase>,
    ) -> Self {
        Self {
            auth,
            connect_usecase,
            disconnect_usecase,
            send_message_usecase,
            typing_usecase,
            history_usecase,
        }
    }

    /// Run the chat server.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            auth: self.auth,
            connect_usecase: self.connect_usecase,
            disconnect_usecase: self.disconnect_usecase,
            send_message_usecase: self.send_message_usecase,
            typing_usecase: self.typing_usecase,
            history_usecase: self.history_usecase,
        });

        let app = Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/register", post(register))
            .route("/api/login", post(login))
            .route("/api/logout", post(logout))
            .route("/api/me", get(me))
            .route("/api/rooms/{room}/messages", get(room_messages))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?token=<session token>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
