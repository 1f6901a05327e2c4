use crate::AppState;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

/// Let the request through only if it carries a valid session cookie.
///
/// Anything else is sent back to the landing page.
pub async fn session_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Response {
    let authenticated = jar
        .get(state.sessions.cookie_name())
        .is_some_and(|cookie| state.sessions.validate(cookie.value()));

    if !authenticated {
        tracing::debug!(uri = %request.uri(), "No session cookie, redirecting to landing page");
        return Redirect::to("/").into_response();
    }

    next.run(request).await
}
