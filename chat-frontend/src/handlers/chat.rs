use crate::error::ChatError;
use crate::models::{ChatRequest, ChatResponse};
use crate::services::metrics::record_chat_outcome;
use crate::AppState;
use axum::{extract::State, http::HeaderMap, Json};
use service_core::observability::REQUEST_ID_HEADER;

/// Relay one message to the completion service.
///
/// A missing body, missing `message` or empty `message` is rejected before
/// anything is sent upstream. Numbers are forwarded as their text.
pub async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<ChatRequest>>,
) -> Result<Json<ChatResponse>, ChatError> {
    let message = payload.and_then(|Json(request)| request.text());

    let Some(message) = message else {
        record_chat_outcome(ChatError::InvalidInput.outcome());
        return Err(ChatError::InvalidInput);
    };

    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok());

    match state.completion.complete(&message, request_id).await {
        Ok(response) => {
            record_chat_outcome("success");
            Ok(Json(ChatResponse { response }))
        }
        Err(e) => {
            tracing::error!(error = %e, "Error calling completion service");
            record_chat_outcome(e.outcome());
            Err(e)
        }
    }
}
