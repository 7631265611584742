//! UseCase: connection handshake.
//!
//! Drives the `Authenticating -> Active` transition: the session token
//! carried by the transport handshake is resolved to a user, the
//! connection is registered, auto-joined to the default room, and a
//! presence broadcast fires. A token that does not resolve never reaches
//! registration or any room.

use std::sync::Arc;

use crate::domain::{AuthService, ConnectionId, RoomId, User};
use crate::infrastructure::{ConnectionRegistry, OutboundSender, RoomRouter};

use super::error::ConnectError;
use super::presence::PresenceBroadcastUseCase;

/// Session-authenticated connection establishment.
pub struct ConnectUseCase {
    auth: Arc<dyn AuthService>,
    registry: Arc<ConnectionRegistry>,
    router: Arc<RoomRouter>,
    presence: Arc<PresenceBroadcastUseCase>,
}

impl ConnectUseCase {
    pub fn new(
        auth: Arc<dyn AuthService>,
        registry: Arc<ConnectionRegistry>,
        router: Arc<RoomRouter>,
        presence: Arc<PresenceBroadcastUseCase>,
    ) -> Self {
        Self {
            auth,
            registry,
            router,
            presence,
        }
    }

    /// Authenticate a freshly upgraded connection and activate it.
    ///
    /// # Arguments
    ///
    /// * `token` - opaque session token from the handshake, if any
    /// * `sender` - the connection's outbound channel
    ///
    /// # Returns
    ///
    /// * `Ok((ConnectionId, User))` - the connection is Active
    /// * `Err(ConnectError::Unauthenticated)` - no valid session; the
    ///   caller must signal `unauthorized` and close
    pub async fn execute(
        &self,
        token: Option<&str>,
        sender: OutboundSender,
    ) -> Result<(ConnectionId, User), ConnectError> {
        let token = token.ok_or(ConnectError::Unauthenticated)?;
        let user = self
            .auth
            .resolve_session(token)
            .await
            .map_err(|_| ConnectError::Unauthenticated)?;

        let connection_id = ConnectionId::generate();
        self.registry
            .register(connection_id, user.clone(), sender)
            .await;
        self.router.join(connection_id, RoomId::global()).await;
        self.presence.broadcast().await;

        tracing::info!(
            "User '{}' connected as '{}' and joined '{}'",
            user.username,
            connection_id,
            RoomId::global()
        );
        Ok((connection_id, user))
    }
}
