use crate::{ConnectionId, ConnectionRegistry, Metrics};

use rc_auth::AclGateway;
use rc_proto::ServerEvent;

use std::sync::Arc;

use log::debug;

/// Context passed to event handlers for one connection.
#[derive(Clone)]
pub struct HandlerContext {
    /// Connection the event arrived on
    pub connection_id: ConnectionId,
    /// Registry shard this connection lives on
    pub registry: ConnectionRegistry,
    /// Gateway to the external access-control API
    pub acl: Arc<AclGateway>,
    /// Metrics collector
    pub metrics: Metrics,
}

impl HandlerContext {
    pub fn new(
        connection_id: ConnectionId,
        registry: ConnectionRegistry,
        acl: Arc<AclGateway>,
        metrics: Metrics,
    ) -> Self {
        Self {
            connection_id,
            registry,
            acl,
            metrics,
        }
    }

    /// Send one event back to this connection.
    ///
    /// Delivery is best effort: a connection that vanished mid-handler or
    /// a full send buffer only produces a log entry.
    pub async fn emit(&self, event: &ServerEvent) {
        match self.registry.emit_to(self.connection_id, event).await {
            Ok(()) => self.metrics.event_sent(event.name()),
            Err(e) => {
                debug!(
                    "Could not deliver {} to connection {}: {}",
                    event.name(),
                    self.connection_id,
                    e
                );
                self.metrics.message_dropped(e.error_code());
            }
        }
    }
}

impl std::fmt::Debug for HandlerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerContext")
            .field("connection_id", &self.connection_id)
            .finish()
    }
}
