//! Health endpoint behavior over the assembled router.

use rc_server::build_router;

use rc_auth::{AclGateway, HandshakeAuthorizer, HandshakePolicy, Result as AuthErrorResult, SessionStore};
use rc_config::SessionStoreConfig;
use rc_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics,
    ShutdownCoordinator,
};

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;

struct NoSessions;

#[async_trait]
impl SessionStore for NoSessions {
    async fn exists(&self, _key: &str) -> AuthErrorResult<bool> {
        Ok(false)
    }
}

fn app_state(shards: Vec<ConnectionRegistry>) -> AppState {
    let policy = HandshakePolicy::new("localhost", 3333, &SessionStoreConfig::default());
    let authorizer = Arc::new(HandshakeAuthorizer::new(Arc::new(NoSessions), policy));
    let acl = Arc::new(AclGateway::from_base_url("http://127.0.0.1:1"));

    AppState::new(
        authorizer,
        acl,
        shards,
        Metrics::new(),
        ShutdownCoordinator::new(),
        ConnectionConfig::default(),
    )
}

fn server_with_shards(shards: Vec<ConnectionRegistry>) -> TestServer {
    TestServer::new(build_router(app_state(shards))).unwrap()
}

fn shard(max_total: usize) -> ConnectionRegistry {
    ConnectionRegistry::new(ConnectionLimits { max_total })
}

#[test]
#[should_panic(expected = "at least one registry shard")]
fn given_no_shards_when_state_built_then_rejected() {
    app_state(Vec::new());
}

#[tokio::test]
async fn given_running_server_when_health_checked_then_reports_workers() {
    let server = server_with_shards(vec![shard(10), shard(10)]);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["workers"], 2);
    assert_eq!(body["connections"], 0);
}

#[tokio::test]
async fn given_active_connection_when_health_checked_then_counted() {
    let registry = shard(10);
    let (tx, _rx) = tokio::sync::mpsc::channel(8);
    registry.register(tx).await.unwrap();
    let server = server_with_shards(vec![registry]);

    let response = server.get("/health").await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["connections"], 1);
}

#[tokio::test]
async fn given_running_server_when_liveness_probed_then_ok() {
    let server = server_with_shards(vec![shard(10)]);

    let response = server.get("/live").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn given_spare_capacity_when_readiness_probed_then_ready() {
    let server = server_with_shards(vec![shard(10)]);

    let response = server.get("/ready").await;

    response.assert_status_ok();
    response.assert_text("Ready");
}

#[tokio::test]
async fn given_every_shard_full_when_readiness_probed_then_unavailable() {
    let registry = shard(1);
    let (tx, _rx) = tokio::sync::mpsc::channel(8);
    registry.register(tx).await.unwrap();
    let server = server_with_shards(vec![registry]);

    let response = server.get("/ready").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}
