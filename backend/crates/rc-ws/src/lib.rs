pub mod app_state;
pub mod connection_config;
pub mod connection_id;
pub mod connection_limits;
pub mod connection_registry;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod room_membership;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_limits::ConnectionLimits;
pub use connection_registry::ConnectionRegistry;
pub use dispatcher::WorkerDispatcher;
pub use error::{Result, WsError};
pub use handlers::context::HandlerContext;
pub use metrics::Metrics;
pub use room_membership::RoomMembership;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for one client event.
/// All log entries within the handler will include these fields.
pub fn create_event_span(connection_id: &ConnectionId, event: &str) -> tracing::Span {
    info_span!(
        "ws_event",
        connection_id = %connection_id,
        event = %event,
    )
}
