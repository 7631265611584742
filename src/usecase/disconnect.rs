//! UseCase: connection teardown.
//!
//! Drives the `Active -> Closed` transition: the connection leaves every
//! room it was joined to, is deregistered, and a presence broadcast fires.
//! Idempotent, so a transport error racing an explicit close is harmless.

use std::sync::Arc;

use crate::domain::ConnectionId;
use crate::infrastructure::{ConnectionRegistry, RoomRouter};

use super::presence::PresenceBroadcastUseCase;

/// Connection teardown and presence update.
pub struct DisconnectUseCase {
    registry: Arc<ConnectionRegistry>,
    router: Arc<RoomRouter>,
    presence: Arc<PresenceBroadcastUseCase>,
}

impl DisconnectUseCase {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        router: Arc<RoomRouter>,
        presence: Arc<PresenceBroadcastUseCase>,
    ) -> Self {
        Self {
            registry,
            router,
            presence,
        }
    }

    /// Remove a connection from every room and from the registry, then
    /// broadcast the updated presence snapshot. Calling this twice for the
    /// same connection is a no-op the second time.
    pub async fn execute(&self, connection_id: &ConnectionId) {
        self.router.leave_all(connection_id).await;
        if self.registry.deregister(connection_id).await {
            self.presence.broadcast().await;
            tracing::info!("Connection '{}' closed", connection_id);
        }
    }
}
