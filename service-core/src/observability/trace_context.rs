//! Correlation headers for calls to upstream services.

use opentelemetry::trace::TraceContextExt;
use reqwest::header::HeaderValue;
use reqwest::{Client, RequestBuilder};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `GET url` carrying the current span's W3C `traceparent` and, when given,
/// the inbound request id. An id that is not a valid header value is dropped.
pub fn traced_get(client: &Client, url: &str, request_id: Option<&str>) -> RequestBuilder {
    let mut request = client.get(url);

    if let Some(traceparent) = current_traceparent() {
        request = request.header(TRACEPARENT_HEADER, traceparent);
    }

    if let Some(id) = request_id.and_then(|id| HeaderValue::from_str(id).ok()) {
        request = request.header(REQUEST_ID_HEADER, id);
    }

    request
}

/// `00-<trace id>-<span id>-<flags>`, or `None` outside an exported span.
fn current_traceparent() -> Option<String> {
    let context = Span::current().context();
    let span = context.span();
    let span_context = span.span_context();

    span_context.is_valid().then(|| {
        format!(
            "00-{}-{}-{:02x}",
            span_context.trace_id(),
            span_context.span_id(),
            span_context.trace_flags().to_u8()
        )
    })
}
