//! Completion provider abstraction.
//!
//! The chat handler only sees [`CompletionProvider`]; the HTTP client for the
//! hosted worker and a scripted mock live behind it.

pub mod mock;
pub mod worker;

pub use mock::{MockCompletionProvider, MockReply};
pub use worker::{WorkerCompletionClient, MAX_RESPONSE_BYTES};

use crate::error::ChatError;
use async_trait::async_trait;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one message and return the completion text.
    ///
    /// `request_id` is forwarded upstream for correlation when present.
    async fn complete(&self, message: &str, request_id: Option<&str>)
        -> Result<String, ChatError>;
}
