//! Composition root: wires settings, services and routes, then serves.

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::handlers::{
    app::{health_check, index, protected_page},
    auth::{login_handler, logout_handler},
    chat::chat_handler,
};
use crate::middleware::auth::session_gate;
use crate::services::{CookieSession, WorkerCompletionClient};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected_path = state.settings.pages.protected_path.clone();
    let assets = ServeDir::new(&state.settings.pages.assets);

    Router::new()
        .route("/", get(index))
        .route(
            &protected_path,
            get(protected_page).layer(from_fn_with_state(state.clone(), session_gate)),
        )
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(crate::handlers::metrics::metrics))
        .nest_service("/static", assets)
        .layer(from_fn(metrics_middleware))
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the production services from `settings` and bind the listener.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let sessions = Arc::new(CookieSession::new(settings.session.clone()));
        let completion = Arc::new(WorkerCompletionClient::new(&settings.upstream)?);

        tracing::info!(
            endpoint = %completion.endpoint(),
            "Initialized completion client"
        );

        let state = AppState::new(settings, sessions, completion);
        Self::with_state(state).await
    }

    /// Bind the listener for an already assembled state (port 0 = random port).
    pub async fn with_state(state: AppState) -> Result<Self, AppError> {
        let address = state.settings.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("Server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
