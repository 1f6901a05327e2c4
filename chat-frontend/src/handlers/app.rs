use crate::AppState;
use axum::{extract::State, http::StatusCode, response::Html, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;
use std::path::Path;

/// Landing page with the login form.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let pages = &state.settings.pages;
    read_page(&pages.directory, &pages.index_file).await
}

/// Chat page. Only reachable through the session gate.
pub async fn protected_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let pages = &state.settings.pages;
    read_page(&pages.directory, &pages.protected_file).await
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "chat-frontend",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

async fn read_page(directory: &Path, file: &str) -> Result<Html<String>, AppError> {
    let path = directory.join(file);

    tokio::fs::read_to_string(&path).await.map(Html).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read page");
        AppError::NotFound(anyhow::anyhow!("Page {} not found", file))
    })
}
