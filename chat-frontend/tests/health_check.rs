//! Runs the real server on a random port.

mod common;

use common::TestApp;

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::spawn("http://127.0.0.1:1/prompt=").await;

    let response = app
        .client()
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "chat-frontend");
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::spawn("http://127.0.0.1:1/prompt=").await;

    let response = app
        .client()
        .get(format!("{}/", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn gate_redirects_over_the_wire() {
    let app = TestApp::spawn("http://127.0.0.1:1/prompt=").await;

    let response = app
        .client()
        .get(format!("{}/sulaai", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/");
}

#[tokio::test]
async fn assets_are_served() {
    let app = TestApp::spawn("http://127.0.0.1:1/prompt=").await;

    let response = app
        .client()
        .get(format!("{}/static/chat.js", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
}
