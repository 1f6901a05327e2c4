use crate::models::{Identity, LoginRequest};
use crate::AppState;
use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use service_core::error::AppError;

/// Start a session for whoever asks.
///
/// There is no credential store: any body, including a missing or unparsable
/// one, yields a session cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Option<Json<LoginRequest>>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let identity = Identity::from(payload.map(|Json(request)| request).unwrap_or_default());
    let cookie = state.sessions.issue(&identity)?;

    tracing::info!(
        email = %identity.email_label(),
        "User logged in"
    );

    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

/// End the session. Succeeds whether or not a session cookie was sent.
pub async fn logout_handler(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let token = jar
        .get(state.sessions.cookie_name())
        .map(|cookie| cookie.value().to_string());
    let removal = state.sessions.revoke(token.as_deref());

    tracing::info!(had_session = token.is_some(), "User logged out");

    (jar.add(removal), Json(json!({ "success": true })))
}
