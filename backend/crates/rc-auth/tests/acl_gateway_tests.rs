//! ACL gateway behavior against a mock authorization endpoint.

use rc_auth::{AclDecision, AclGateway};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn gateway_with_response(response: ResponseTemplate) -> (MockServer, AclGateway) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/p1/7.json"))
        .respond_with(response)
        .mount(&server)
        .await;

    let gateway = AclGateway::from_base_url(server.uri());
    (server, gateway)
}

#[tokio::test]
async fn given_check_true_when_checked_then_authorized() {
    let body = json!({ "result": { "check": true } });
    let (_server, gateway) = gateway_with_response(ResponseTemplate::new(200).set_body_json(body)).await;

    assert_eq!(gateway.check_access("p1", 7).await, AclDecision::Authorized);
}

#[tokio::test]
async fn given_check_false_when_checked_then_denied() {
    let body = json!({ "result": { "check": false } });
    let (_server, gateway) = gateway_with_response(ResponseTemplate::new(200).set_body_json(body)).await;

    assert_eq!(gateway.check_access("p1", 7).await, AclDecision::Denied);
}

#[tokio::test]
async fn given_malformed_body_when_checked_then_denied() {
    let (_server, gateway) =
        gateway_with_response(ResponseTemplate::new(200).set_body_string("not json")).await;

    assert_eq!(gateway.check_access("p1", 7).await, AclDecision::Denied);
}

#[tokio::test]
async fn given_body_missing_check_field_when_checked_then_denied() {
    let body = json!({ "result": {} });
    let (_server, gateway) = gateway_with_response(ResponseTemplate::new(200).set_body_json(body)).await;

    assert_eq!(gateway.check_access("p1", 7).await, AclDecision::Denied);
}

#[tokio::test]
async fn given_server_error_when_checked_then_denied() {
    let (_server, gateway) = gateway_with_response(ResponseTemplate::new(500)).await;

    assert_eq!(gateway.check_access("p1", 7).await, AclDecision::Denied);
}

#[tokio::test]
async fn given_unreachable_endpoint_when_checked_then_denied() {
    // Nothing listening on this port.
    let gateway = AclGateway::from_base_url("http://127.0.0.1:1");

    assert_eq!(gateway.check_access("p1", 7).await, AclDecision::Denied);
}

#[tokio::test]
async fn given_check_true_when_different_user_requested_then_path_is_per_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/p1/8.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "result": { "check": true } })),
        )
        .mount(&server)
        .await;

    let gateway = AclGateway::from_base_url(server.uri());

    // The mocked path only covers user 8; user 7 falls through to 404.
    assert_eq!(gateway.check_access("p1", 8).await, AclDecision::Authorized);
    assert_eq!(gateway.check_access("p1", 7).await, AclDecision::Denied);
}
