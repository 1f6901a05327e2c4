use serde::Deserialize;
use service_core::error::AppError;
use std::path::{Path, PathBuf};

/// Default upstream completion endpoint. The percent-encoded message is appended verbatim.
pub const DEFAULT_UPSTREAM_ENDPOINT: &str = "https://sula-ai.sulakshamadara0.workers.dev/prompt=";

const DEFAULT_PORT: u16 = 3000;
const SESSION_MAX_AGE_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub session: SessionSettings,
    pub pages: PageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    /// URL prefix the encoded message is appended to.
    pub endpoint: String,
    /// Per-request timeout. Unset means wait for the upstream indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub max_age_seconds: i64,
    /// Mark the cookie `Secure`. Off by default so plain-HTTP development works.
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageSettings {
    /// Directory holding the HTML pages. Not served as a directory.
    pub directory: PathBuf,
    /// Directory served under `/static`.
    pub assets: PathBuf,
    pub index_file: String,
    pub protected_file: String,
    /// Route of the cookie-gated page.
    pub protected_path: String,
}

impl Settings {
    /// Layer defaults, `config/base.yaml`, `APP_*` variables and `PORT`.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(std::env::vars().collect())
    }

    /// Same layering as [`Settings::load`], reading variables from `vars`
    /// instead of the process environment.
    pub fn load_from(vars: config::Map<String, String>) -> Result<Self, AppError> {
        let crate_dir = crate_directory()?;
        let port = vars.get("PORT").cloned();

        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("upstream.endpoint", DEFAULT_UPSTREAM_ENDPOINT)?
            .set_default("session.cookie_name", "user")?
            .set_default("session.max_age_seconds", SESSION_MAX_AGE_SECONDS)?
            .set_default("session.secure", false)?
            .set_default("pages.directory", path_string(&crate_dir.join("pages")))?
            .set_default("pages.assets", path_string(&crate_dir.join("static")))?
            .set_default("pages.index_file", "index.html")?
            .set_default("pages.protected_file", "sulaai.html")?
            .set_default("pages.protected_path", "/sulaai")?
            .add_source(
                config::File::from(crate_dir.join("config").join("base.yaml")).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .source(Some(vars)),
            )
            .set_override_option("server.port", port)?
            .build()?;

        Ok(settings.try_deserialize::<Settings>()?)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// The crate directory, whether started from the workspace root or the crate itself.
fn crate_directory() -> Result<PathBuf, AppError> {
    let base_path = std::env::current_dir()?;

    if base_path.ends_with("chat-frontend") {
        Ok(base_path)
    } else {
        Ok(base_path.join("chat-frontend"))
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
