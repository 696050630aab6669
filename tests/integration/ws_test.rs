//! Integration tests for WebSocket connections and event fan-out.
//!
//! These run against a real listener on an OS-assigned port, with
//! `tokio-tungstenite` as the client, so the full upgrade path and the
//! socket loop are exercised rather than just the handler signature.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use futures::{SinkExt, Stream, StreamExt};
use serde_json::Value;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};

use reunite_entity::user::UserRole;

use crate::helpers::TestApp;

type WsClient = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn connect(addr: SocketAddr, token: &str) -> WsClient {
    let (ws, _response) = connect_async(format!("ws://{addr}/ws?token={token}"))
        .await
        .expect("websocket upgrade failed");
    ws
}

/// Complete one join round trip on a fresh socket.
///
/// The server reads client frames only after admission has finished, so
/// the ack proves the connection is registered and sitting in its role
/// groups. Without this, a publish could race the server-side admission
/// of a socket whose client-side handshake already resolved.
async fn ready(ws: &mut WsClient) {
    ws.send(Message::text(r#"{"type":"join","group":"case-99"}"#))
        .await
        .expect("join request failed to send");
    let ack = next_event(ws).await;
    assert_eq!(ack["event"], "GroupJoined");
}

/// Read the next text frame and parse it as JSON.
async fn next_event<S>(ws: &mut S) -> Value
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for an event")
        .expect("socket closed before an event arrived")
        .expect("websocket transport error");
    let text = msg.into_text().expect("expected a text frame");
    serde_json::from_str(&text).expect("events are JSON")
}

/// The HTTP status a refused upgrade came back with.
fn refusal_status(err: tungstenite::Error) -> Option<u16> {
    match err {
        tungstenite::Error::Http(response) => Some(response.status().as_u16()),
        _ => None,
    }
}

/// Poll until the hub reports the expected number of live connections.
async fn wait_for_connections(app: &TestApp, expected: u64) {
    for _ in 0..100 {
        let health = app.request("GET", "/api/health/detailed", None, None).await;
        if health.body["data"]["live_connections"] == serde_json::json!(expected) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("never reached {expected} live connections");
}

#[tokio::test]
async fn test_ws_rejects_missing_and_invalid_tokens() {
    let app = TestApp::new().await;
    let addr = app.serve().await;

    let err = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect_err("upgrade without a token must be refused");
    assert_eq!(refusal_status(err), Some(400));

    let err = connect_async(format!("ws://{addr}/ws?token=not-a-jwt"))
        .await
        .expect_err("upgrade with a bad token must be refused");
    assert_eq!(refusal_status(err), Some(401));
}

#[tokio::test]
async fn test_admin_events_reach_every_admin_and_nobody_else() {
    let app = TestApp::new().await;
    let addr = app.serve().await;

    let first = app.mint_access_token("first@example.com", vec![UserRole::Admin]);
    let second = app.mint_access_token("second@example.com", vec![UserRole::Admin]);
    let member = app.mint_access_token("member@example.com", vec![UserRole::Member]);
    let staff = app.mint_access_token("desk@example.com", vec![UserRole::Manager]);

    let mut admin_a = connect(addr, &first).await;
    ready(&mut admin_a).await;
    let mut admin_b = connect(addr, &second).await;
    ready(&mut admin_b).await;

    // The member follows a public case; admins sit in their role group
    // from admission.
    let mut follower = connect(addr, &member).await;
    follower
        .send(Message::text(r#"{"type":"join","group":"case-7"}"#))
        .await
        .expect("join request failed to send");
    let ack = next_event(&mut follower).await;
    assert_eq!(ack["event"], "GroupJoined");
    assert_eq!(ack["group"], "case-7");

    // Publish a user change to the admin feed through the HTTP surface.
    let response = app
        .request(
            "POST",
            "/api/admin/notify",
            Some(serde_json::json!({
                "group": "Admins",
                "event": "UserChanged",
                "operation": "update",
                "user": {"email": "kit@example.com"},
            })),
            Some(&staff),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["attempted"], 2);
    assert_eq!(response.body["data"]["delivered"], 2);

    for ws in [&mut admin_a, &mut admin_b] {
        let wire = next_event(ws).await;
        assert_eq!(wire["event"], "UserChanged");
        assert_eq!(wire["operation"], "update");
        assert_eq!(wire["user"]["email"], "kit@example.com");
        assert_eq!(wire["actor"], "desk@example.com");
        assert!(wire["timestamp"].is_string());
    }

    // Frames per connection arrive in order, so the case event being the
    // follower's next frame proves the admin event never reached it.
    let response = app
        .request(
            "POST",
            "/api/admin/notify",
            Some(serde_json::json!({
                "group": "case-7",
                "event": "PublicCaseChanged",
                "operation": "update",
                "case": {"id": 7},
            })),
            Some(&staff),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["delivered"], 1);

    let wire = next_event(&mut follower).await;
    assert_eq!(wire["event"], "PublicCaseChanged");
    assert_eq!(wire["case"]["id"], 7);
}

#[tokio::test]
async fn test_join_refusals_travel_the_socket() {
    let app = TestApp::new().await;
    let addr = app.serve().await;
    let member = app.mint_access_token("member@example.com", vec![UserRole::Member]);

    let mut ws = connect(addr, &member).await;

    ws.send(Message::text(r#"{"type":"join","group":"Admins"}"#))
        .await
        .expect("join request failed to send");
    let refusal = next_event(&mut ws).await;
    assert_eq!(refusal["event"], "Error");
    assert_eq!(refusal["code"], "FORBIDDEN");

    ws.send(Message::text("not json at all"))
        .await
        .expect("message failed to send");
    let refusal = next_event(&mut ws).await;
    assert_eq!(refusal["event"], "Error");
    assert_eq!(refusal["code"], "INVALID_MESSAGE");
}

#[tokio::test]
async fn test_disconnect_leaves_the_live_count() {
    let app = TestApp::new().await;
    let addr = app.serve().await;
    let token = app.mint_access_token("member@example.com", vec![UserRole::Member]);

    let mut ws = connect(addr, &token).await;
    wait_for_connections(&app, 1).await;

    ws.close(None).await.expect("close failed");
    wait_for_connections(&app, 0).await;
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(response.body["data"]["version"].is_string());
}

#[tokio::test]
async fn test_detailed_health_reports_an_unreachable_database() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health/detailed", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "degraded");
    assert_eq!(response.body["data"]["database"], "unreachable");
    assert_eq!(response.body["data"]["live_connections"], 0);
}
