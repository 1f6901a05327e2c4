//! Login always issues the `user` cookie; logout always clears it.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chat_frontend::services::completion::MockCompletionProvider;
use common::{body_json, mock_router, PROTECTED_PATH};
use std::sync::Arc;
use tower::util::ServiceExt;

fn set_cookie_headers(response: &axum::http::Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

fn login_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn cookie_identity(set_cookie: &str) -> serde_json::Value {
    let value = set_cookie
        .trim_start_matches("user=")
        .split(';')
        .next()
        .unwrap();
    serde_json::from_str(&urlencoding::decode(value).unwrap()).unwrap()
}

#[tokio::test]
async fn login_sets_user_cookie_with_identity_json() {
    let app = mock_router(Arc::new(MockCompletionProvider::echo()));

    let response = app
        .oneshot(login_request(r#"{"email":"ada@example.com","name":"Ada Lovelace"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookie_headers(&response);
    assert_eq!(cookies.len(), 1);
    let cookie = &cookies[0];

    assert!(cookie.starts_with("user="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.contains("Path=/"));

    assert_eq!(
        cookie_identity(cookie),
        serde_json::json!({ "email": "ada@example.com", "name": "Ada Lovelace" })
    );

    assert_eq!(body_json(response).await, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn login_keeps_non_string_fields() {
    let app = mock_router(Arc::new(MockCompletionProvider::echo()));

    let response = app
        .oneshot(login_request(r#"{"email":"a@b.c","name":42}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookie_headers(&response);
    assert_eq!(
        cookie_identity(&cookies[0]),
        serde_json::json!({ "email": "a@b.c", "name": 42 })
    );
}

#[tokio::test]
async fn login_accepts_any_body() {
    for body in [r#"{}"#, r#"{"email":"x"}"#, "not json", ""] {
        let app = mock_router(Arc::new(MockCompletionProvider::echo()));

        let response = app.oneshot(login_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "body {body:?}");
        assert_eq!(set_cookie_headers(&response).len(), 1);
        assert_eq!(body_json(response).await["success"], true);
    }
}

#[tokio::test]
async fn issued_cookie_opens_the_gate() {
    let app = mock_router(Arc::new(MockCompletionProvider::echo()));

    let login = app
        .clone()
        .oneshot(login_request(r#"{"email":"ada@example.com","name":"Ada"}"#))
        .await
        .unwrap();
    let cookie = set_cookie_headers(&login)[0]
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(PROTECTED_PATH)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_clears_cookie_even_without_a_session() {
    for cookie in [None, Some("user=%7B%7D")] {
        let app = mock_router(Arc::new(MockCompletionProvider::echo()));

        let mut builder = Request::builder().method("POST").uri("/logout");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookies = set_cookie_headers(&response);
        assert_eq!(cookies.len(), 1, "cookie {cookie:?}");
        assert!(cookies[0].starts_with("user=;"));
        assert!(cookies[0].contains("Max-Age=0"));
        assert_eq!(body_json(response).await, serde_json::json!({ "success": true }));
    }
}
