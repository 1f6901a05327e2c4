use crate::error::ChatError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/chat`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    pub message: Option<Value>,
}

impl ChatRequest {
    /// The text to forward, if any.
    ///
    /// Non-empty strings pass through. Non-zero numbers and `true` are sent as
    /// their JSON text. Everything else counts as no message.
    pub fn text(self) -> Option<String> {
        match self.message? {
            Value::String(text) if !text.is_empty() => Some(text),
            Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Decoded upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Success { text: String },
    Failure { message: String },
}

// Wire shape: `{"response":{"response":"..."}}` or `{"error":{"message":"..."}}`.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    response: Option<RawCompletion>,
    #[serde(default)]
    error: Option<RawError>,
}

#[derive(Deserialize)]
struct RawCompletion {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Deserialize)]
struct RawError {
    #[serde(default)]
    message: Option<String>,
}

impl Envelope {
    /// Decode an upstream body given its HTTP status.
    ///
    /// Any non-success status is a `Failure`, whatever the body looks like.
    /// A success status without the nested completion text is a transport failure.
    pub fn decode(status: StatusCode, body: &[u8]) -> Result<Self, ChatError> {
        let parsed = serde_json::from_slice::<RawEnvelope>(body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|raw| raw.error)
                .and_then(|error| error.message)
                .unwrap_or_else(|| format!("Completion service responded with status {}", status));
            return Ok(Envelope::Failure { message });
        }

        let raw = parsed.map_err(|e| {
            ChatError::TransportFailure(format!("Invalid JSON from completion service: {}", e))
        })?;

        raw.response
            .and_then(|completion| completion.response)
            .map(|text| Envelope::Success { text })
            .ok_or_else(|| {
                ChatError::TransportFailure(
                    "Completion service response is missing response.response".to_string(),
                )
            })
    }

    pub fn into_result(self) -> Result<String, ChatError> {
        match self {
            Envelope::Success { text } => Ok(text),
            Envelope::Failure { message } => Err(ChatError::UpstreamFailure(message)),
        }
    }
}
