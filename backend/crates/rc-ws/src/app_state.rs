use crate::{
    ConnectionConfig, ConnectionRegistry, Metrics, ShutdownCoordinator, WebSocketConnection,
};

use rc_auth::{AclGateway, HandshakeAuthorizer, is_cross_origin};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header},
    response::Response,
};
use log::{debug, error, warn};

/// Shared application state for WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub authorizer: Arc<HandshakeAuthorizer>,
    pub acl: Arc<AclGateway>,
    /// One registry shard per worker; a connection is pinned to its
    /// shard at upgrade time.
    pub shards: Vec<ConnectionRegistry>,
    pub next_shard: Arc<AtomicUsize>,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

impl AppState {
    pub fn new(
        authorizer: Arc<HandshakeAuthorizer>,
        acl: Arc<AclGateway>,
        shards: Vec<ConnectionRegistry>,
        metrics: Metrics,
        shutdown: ShutdownCoordinator,
        config: ConnectionConfig,
    ) -> Self {
        // Round-robin pinning indexes modulo the shard count
        assert!(!shards.is_empty(), "at least one registry shard required");

        Self {
            authorizer,
            acl,
            shards,
            next_shard: Arc::new(AtomicUsize::new(0)),
            metrics,
            shutdown,
            config,
        }
    }
}

/// WebSocket upgrade handler. Admission runs before the channel is
/// established; a rejected handshake never reaches `on_upgrade`.
pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let host = header_str(&headers, header::HOST);
    let origin = header_str(&headers, header::ORIGIN);
    let cookie = header_str(&headers, header::COOKIE);

    let cross_origin = is_cross_origin(origin, &state.authorizer.policy().host);
    if let Err(e) = state.authorizer.authorize(host, cross_origin, cookie).await {
        warn!("Admission denied: {e}");
        state.metrics.admission_denied(e.reason());
        return Err(StatusCode::UNAUTHORIZED);
    }

    // Pin the connection to a worker shard round-robin
    let index = state.next_shard.fetch_add(1, Ordering::Relaxed) % state.shards.len();
    let shard = state.shards[index].clone();
    if !shard.has_capacity().await {
        warn!("Shard {index} at connection limit, refusing upgrade");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    debug!("Admitted WebSocket upgrade on shard {index}");
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, shard, state)))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(socket: WebSocket, shard: ConnectionRegistry, state: AppState) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(
        shard,
        Arc::clone(&state.acl),
        state.config.clone(),
        state.metrics.clone(),
    );

    if let Err(e) = connection.handle(socket, shutdown_guard).await {
        error!("Connection error: {e}");
        state.metrics.error_occurred(e.error_code());
    }
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
