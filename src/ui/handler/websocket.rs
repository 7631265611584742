//! WebSocket connection handler.
//!
//! Lifecycle per connection: `Connecting -> Authenticating -> Active ->
//! Closed`. The session token travels in the upgrade query string; a
//! token that does not resolve gets an `unauthorized` event and an
//! immediate close, before any registration, room join, or message
//! processing. An Active connection runs a receive loop and a pusher
//! loop joined with `select!`, so either side ending tears both down.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::infrastructure::dto::websocket::{ClientEvent, UnauthorizedEvent};
use crate::ui::state::AppState;
use crate::usecase::InboundMessage;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    // Authentication happens after the upgrade so the client receives an
    // explicit `unauthorized` event instead of a bare failed handshake.
    ws.on_upgrade(move |socket| handle_socket(socket, state, query.token))
}

/// Spawns a task that drains the connection's outbound channel into the
/// WebSocket sink. FIFO: delivery order is queue order.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, token: Option<String>) {
    let (mut sender, mut receiver) = socket.split();

    // Create the outbound channel for this connection
    let (tx, rx) = mpsc::unbounded_channel();

    let (connection_id, user) = match state.connect_usecase.execute(token.as_deref(), tx).await {
        Ok(active) => active,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            let payload = serde_json::to_string(&UnauthorizedEvent::new()).unwrap();
            let _ = sender.send(Message::Text(payload.into())).await;
            let _ = sender.close().await;
            return;
        }
    };

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring unparseable event from '{}': {}",
                                connection_id,
                                e
                            );
                            continue;
                        }
                    };

                    match event {
                        ClientEvent::Message {
                            content,
                            room,
                            receiver_id,
                        } => {
                            let inbound = InboundMessage {
                                content,
                                room,
                                receiver_id,
                            };
                            // store failures are logged and the event
                            // dropped; the sender gets no transport error
                            if let Err(e) = state_clone
                                .send_message_usecase
                                .execute(&connection_id, inbound)
                                .await
                            {
                                tracing::error!(
                                    "Failed to dispatch message from '{}': {}",
                                    connection_id,
                                    e
                                );
                            }
                        }
                        ClientEvent::Typing { room } => {
                            if let Err(e) = state_clone
                                .typing_usecase
                                .execute(&connection_id, room)
                                .await
                            {
                                tracing::warn!(
                                    "Failed to relay typing from '{}': {}",
                                    connection_id,
                                    e
                                );
                            }
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping from '{}'", connection_id);
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If either task completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_usecase.execute(&connection_id).await;
    tracing::info!("User '{}' disconnected ('{}')", user.username, connection_id);
}
