//! Shared setup for chat-frontend integration tests.

#![allow(dead_code)]

use axum::{body::Body, http::Response, Router};
use chat_frontend::{
    config::{PageSettings, ServerSettings, SessionSettings, Settings, UpstreamSettings},
    services::{
        completion::MockCompletionProvider, CompletionProvider, CookieSession,
        WorkerCompletionClient,
    },
    startup::{build_router, Application},
    AppState,
};
use std::path::PathBuf;
use std::sync::Arc;

pub const PROTECTED_PATH: &str = "/sulaai";

pub fn test_settings(upstream_endpoint: &str) -> Settings {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        upstream: UpstreamSettings {
            endpoint: upstream_endpoint.to_string(),
            timeout_seconds: Some(5),
        },
        session: SessionSettings {
            cookie_name: "user".to_string(),
            max_age_seconds: 86_400,
            secure: false,
        },
        pages: PageSettings {
            directory: crate_dir.join("pages"),
            assets: crate_dir.join("static"),
            index_file: "index.html".to_string(),
            protected_file: "sulaai.html".to_string(),
            protected_path: PROTECTED_PATH.to_string(),
        },
    }
}

fn state_with(settings: Settings, completion: Arc<dyn CompletionProvider>) -> AppState {
    let sessions = Arc::new(CookieSession::new(settings.session.clone()));
    AppState::new(settings, sessions, completion)
}

/// Router backed by the real HTTP completion client pointed at `upstream_endpoint`.
pub fn worker_router(upstream_endpoint: &str) -> Router {
    let settings = test_settings(upstream_endpoint);
    let completion = Arc::new(
        WorkerCompletionClient::new(&settings.upstream).expect("Failed to build completion client"),
    );
    build_router(state_with(settings, completion))
}

/// Router backed by a scripted provider.
pub fn mock_router(provider: Arc<MockCompletionProvider>) -> Router {
    build_router(state_with(
        test_settings("http://127.0.0.1:1/prompt="),
        provider,
    ))
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// A server bound to a random local port.
pub struct TestApp {
    pub address: String,
}

impl TestApp {
    pub async fn spawn(upstream_endpoint: &str) -> Self {
        let settings = test_settings(upstream_endpoint);
        let completion = Arc::new(
            WorkerCompletionClient::new(&settings.upstream)
                .expect("Failed to build completion client"),
        );
        let app = Application::with_state(state_with(settings, completion))
            .await
            .expect("Failed to build application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            let _ = app.run_until_stopped().await;
        });

        Self { address }
    }

    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build client")
    }
}
