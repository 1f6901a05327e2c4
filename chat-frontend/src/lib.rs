pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use crate::config::Settings;
use services::{CompletionProvider, SessionManager};
use std::sync::Arc;

/// Shared application state: settings plus the session and completion seams.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sessions: Arc<dyn SessionManager>,
    pub completion: Arc<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        sessions: Arc<dyn SessionManager>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            sessions,
            completion,
        }
    }
}
