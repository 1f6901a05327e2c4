use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned when the upstream could not be reached or understood.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to get a response from the completion service";

/// Failures of a single chat exchange.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message is required")]
    InvalidInput,

    /// The upstream answered with a non-success status.
    #[error("{0}")]
    UpstreamFailure(String),

    /// Network error, unreadable body or malformed envelope. The detail is logged, not returned.
    #[error("Transport failure: {0}")]
    TransportFailure(String),
}

impl ChatError {
    /// Metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            ChatError::InvalidInput => "invalid_input",
            ChatError::UpstreamFailure(_) => "upstream_failure",
            ChatError::TransportFailure(_) => "transport_failure",
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let (status, error) = match &self {
            ChatError::InvalidInput => (StatusCode::BAD_REQUEST, self.to_string()),
            ChatError::UpstreamFailure(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
            ChatError::TransportFailure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                TRANSPORT_FAILURE_MESSAGE.to_string(),
            ),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
