//! Scripted provider for exercising handlers without a network.

use super::CompletionProvider;
use crate::error::ChatError;
use async_trait::async_trait;
use std::sync::Mutex;

/// Canned outcome returned by [`MockCompletionProvider`].
#[derive(Debug, Clone)]
pub enum MockReply {
    Echo,
    Text(String),
    UpstreamFailure(String),
    TransportFailure(String),
}

/// Returns a fixed reply and remembers every message it was sent.
pub struct MockCompletionProvider {
    reply: MockReply,
    received: Mutex<Vec<String>>,
}

impl MockCompletionProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn echo() -> Self {
        Self::new(MockReply::Echo)
    }

    pub fn received(&self) -> Vec<String> {
        self.received
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        message: &str,
        _request_id: Option<&str>,
    ) -> Result<String, ChatError> {
        if message.is_empty() {
            return Err(ChatError::InvalidInput);
        }

        if let Ok(mut received) = self.received.lock() {
            received.push(message.to_string());
        }

        match &self.reply {
            MockReply::Echo => Ok(format!("Mock response for: {}", message)),
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::UpstreamFailure(message) => Err(ChatError::UpstreamFailure(message.clone())),
            MockReply::TransportFailure(detail) => Err(ChatError::TransportFailure(detail.clone())),
        }
    }
}
