//! Session issuing and checking.
//!
//! The shipped implementation keeps everything in the client's cookie. The
//! gate only asks whether a token exists, so swapping in real verification
//! means implementing [`SessionManager`] and nothing else.

use crate::config::SessionSettings;
use crate::models::Identity;
use axum_extra::extract::cookie::{Cookie, SameSite};

pub trait SessionManager: Send + Sync {
    /// Name of the cookie carrying the session token.
    fn cookie_name(&self) -> &str;

    /// Build the cookie that establishes a session for `identity`.
    fn issue(&self, identity: &Identity) -> anyhow::Result<Cookie<'static>>;

    /// Whether `token` grants access to protected pages.
    fn validate(&self, token: &str) -> bool;

    /// Build the cookie that ends the session. `token` is the current value, if any.
    fn revoke(&self, token: Option<&str>) -> Cookie<'static>;
}

/// Presence-only sessions held in a client cookie.
///
/// The cookie value is the JSON identity; the cookie jar percent-encodes it on
/// the wire. It is never parsed back, so revocation before expiry is not possible.
pub struct CookieSession {
    settings: SessionSettings,
}

impl CookieSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self { settings }
    }
}

impl SessionManager for CookieSession {
    fn cookie_name(&self) -> &str {
        &self.settings.cookie_name
    }

    fn issue(&self, identity: &Identity) -> anyhow::Result<Cookie<'static>> {
        let value = serde_json::to_string(identity)?;

        Ok(Cookie::build((self.settings.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .secure(self.settings.secure)
            .same_site(SameSite::Strict)
            .max_age(time::Duration::seconds(self.settings.max_age_seconds))
            .build())
    }

    fn validate(&self, token: &str) -> bool {
        !token.is_empty()
    }

    fn revoke(&self, token: Option<&str>) -> Cookie<'static> {
        if token.is_none() {
            tracing::debug!("Clearing session cookie that was not sent");
        }

        let mut cookie = Cookie::build((self.settings.cookie_name.clone(), ""))
            .path("/")
            .build();
        cookie.make_removal();
        cookie
    }
}
