//! Enter/leave flow against a mock access-control endpoint.

use rc_ws::handlers::{enter, leave};
use rc_ws::{ConnectionId, ConnectionLimits, ConnectionRegistry, HandlerContext, Metrics};

use rc_auth::AclGateway;
use rc_proto::{EnterRequest, UserRef};

use std::sync::Arc;

use axum::extract::ws::Message;
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn acl_allowing(project: &str, user_id: i64) -> (MockServer, Arc<AclGateway>) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/auth/{project}/{user_id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "check": true }
        })))
        .mount(&server)
        .await;

    let gateway = Arc::new(AclGateway::from_base_url(server.uri()));
    (server, gateway)
}

async fn acl_denying() -> (MockServer, Arc<AclGateway>) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "check": false }
        })))
        .mount(&server)
        .await;

    let gateway = Arc::new(AclGateway::from_base_url(server.uri()));
    (server, gateway)
}

/// Gateway pointing at a closed port; any request through it would
/// come back as a denial, so an "invalid request parameters" reply
/// proves the handler never reached the network.
fn acl_unreachable() -> Arc<AclGateway> {
    Arc::new(AclGateway::from_base_url("http://127.0.0.1:1"))
}

struct Session {
    ctx: HandlerContext,
    rx: mpsc::Receiver<Message>,
    registry: ConnectionRegistry,
    connection_id: ConnectionId,
}

async fn session(acl: Arc<AclGateway>) -> Session {
    let registry = ConnectionRegistry::new(ConnectionLimits { max_total: 10 });
    let (tx, rx) = mpsc::channel(8);
    let connection_id = registry.register(tx).await.unwrap();
    let ctx = HandlerContext::new(connection_id, registry.clone(), acl, Metrics::new());
    Session {
        ctx,
        rx,
        registry,
        connection_id,
    }
}

fn next_json(rx: &mut mpsc::Receiver<Message>) -> serde_json::Value {
    match rx.try_recv().expect("expected a queued frame") {
        Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
        other => panic!("expected text frame, got {other:?}"),
    }
}

fn enter_request(project: Option<&str>, user_id: Option<i64>) -> EnterRequest {
    EnterRequest {
        project: project.map(str::to_string),
        user: user_id.map(|id| UserRef {
            id,
            name: format!("user-{id}"),
        }),
    }
}

#[tokio::test]
async fn given_authorized_user_when_entered_then_membership_and_ack() {
    let (_server, acl) = acl_allowing("p1", 7).await;
    let mut s = session(acl).await;

    enter::handle_enter(enter_request(Some("p1"), Some(7)), &s.ctx).await;

    assert_eq!(next_json(&mut s.rx)["event"], "entered");
    assert!(s.registry.is_member(s.connection_id, "p1").await);
    assert_eq!(s.registry.room_size("p1").await, 1);
}

#[tokio::test]
async fn given_missing_project_when_entered_then_error_without_acl_call() {
    let mut s = session(acl_unreachable()).await;

    enter::handle_enter(enter_request(None, Some(7)), &s.ctx).await;

    let event = next_json(&mut s.rx);
    assert_eq!(event["event"], "error");
    assert_eq!(event["data"]["message"], "invalid request parameters");
}

#[tokio::test]
async fn given_missing_user_when_entered_then_error_without_acl_call() {
    let mut s = session(acl_unreachable()).await;

    enter::handle_enter(enter_request(Some("p1"), None), &s.ctx).await;

    let event = next_json(&mut s.rx);
    assert_eq!(event["event"], "error");
    assert_eq!(event["data"]["message"], "invalid request parameters");
}

#[tokio::test]
async fn given_denied_user_when_entered_then_error_and_no_membership() {
    let (_server, acl) = acl_denying().await;
    let mut s = session(acl).await;

    enter::handle_enter(enter_request(Some("p1"), Some(7)), &s.ctx).await;

    let event = next_json(&mut s.rx);
    assert_eq!(event["event"], "error");
    assert_eq!(
        event["data"]["message"],
        "no access capability for this project"
    );
    assert!(!s.registry.is_member(s.connection_id, "p1").await);
}

#[tokio::test]
async fn given_repeat_enter_when_authorized_then_single_membership_two_acks() {
    let (_server, acl) = acl_allowing("p1", 7).await;
    let mut s = session(acl).await;

    enter::handle_enter(enter_request(Some("p1"), Some(7)), &s.ctx).await;
    enter::handle_enter(enter_request(Some("p1"), Some(7)), &s.ctx).await;

    assert_eq!(next_json(&mut s.rx)["event"], "entered");
    assert_eq!(next_json(&mut s.rx)["event"], "entered");
    assert_eq!(s.registry.room_size("p1").await, 1);
}

#[tokio::test]
async fn given_disconnect_before_acl_result_when_entered_then_no_op() {
    let (_server, acl) = acl_allowing("p1", 7).await;
    let s = session(acl).await;

    // Simulate the socket closing while the ACL round-trip is in flight.
    s.registry.unregister(s.connection_id).await;
    enter::handle_enter(enter_request(Some("p1"), Some(7)), &s.ctx).await;

    assert_eq!(s.registry.room_size("p1").await, 0);
}

#[tokio::test]
async fn given_membership_when_left_then_ack_and_room_empty() {
    let (_server, acl) = acl_allowing("p1", 7).await;
    let mut s = session(acl).await;
    enter::handle_enter(enter_request(Some("p1"), Some(7)), &s.ctx).await;
    assert_eq!(next_json(&mut s.rx)["event"], "entered");

    leave::handle_leave(&s.ctx).await;

    assert_eq!(next_json(&mut s.rx)["event"], "left");
    assert_eq!(s.registry.room_size("p1").await, 0);
}

#[tokio::test]
async fn given_no_membership_when_left_then_silent() {
    let mut s = session(acl_unreachable()).await;

    leave::handle_leave(&s.ctx).await;

    assert!(s.rx.try_recv().is_err());
}
