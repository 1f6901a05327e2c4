//! HTTP client for the hosted completion worker.
//!
//! The worker takes the prompt as part of the URL and answers with a JSON
//! envelope. One GET per message; no retries.

use super::CompletionProvider;
use crate::config::UpstreamSettings;
use crate::error::ChatError;
use crate::models::Envelope;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use service_core::error::AppError;
use service_core::observability::traced_get;
use std::time::Duration;

/// Largest upstream body read before giving up.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

pub struct WorkerCompletionClient {
    client: Client,
    endpoint: String,
}

impl WorkerCompletionClient {
    pub fn new(settings: &UpstreamSettings) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(seconds) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .context("Failed to create completion HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Append the percent-encoded message to the endpoint prefix.
    pub fn request_url(&self, message: &str) -> String {
        format!("{}{}", self.endpoint, urlencoding::encode(message))
    }
}

#[async_trait]
impl CompletionProvider for WorkerCompletionClient {
    async fn complete(
        &self,
        message: &str,
        request_id: Option<&str>,
    ) -> Result<String, ChatError> {
        if message.is_empty() {
            return Err(ChatError::InvalidInput);
        }

        let url = self.request_url(message);

        tracing::debug!(
            endpoint = %self.endpoint,
            message_len = message.len(),
            "Sending prompt to completion service"
        );

        let response = traced_get(&self.client, &url, request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint = %self.endpoint, error = %e, "Completion request failed");
                ChatError::TransportFailure(e.to_string())
            })?;

        let status = response.status();
        let body = read_limited(response).await.inspect_err(|e| {
            tracing::error!(%status, error = %e, "Failed to read completion response body");
        })?;

        let envelope = Envelope::decode(status, &body)?;
        if let Envelope::Failure { message } = &envelope {
            tracing::error!(%status, error = %message, "Completion service returned an error");
        }

        envelope.into_result()
    }
}

/// Read the body, refusing anything over [`MAX_RESPONSE_BYTES`].
async fn read_limited(mut response: Response) -> Result<Vec<u8>, ChatError> {
    let too_large = || {
        ChatError::TransportFailure(format!(
            "Completion response exceeds {} bytes",
            MAX_RESPONSE_BYTES
        ))
    };

    if response
        .content_length()
        .is_some_and(|length| length > MAX_RESPONSE_BYTES as u64)
    {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| ChatError::TransportFailure(e.to_string()))?
    {
        if body.len() + chunk.len() > MAX_RESPONSE_BYTES {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
