//! Request tracing and request-id propagation.
//!
//! Every request gets an `x-request-id` (kept when the caller sent one,
//! otherwise a fresh UUID v4). The id is recorded on the request span and
//! echoed on the response, so one request can be followed through the logs
//! of both services.

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::Router;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The request id on `headers`, if present and valid UTF-8.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok())
}

fn make_span(request: &Request) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = request_id(request.headers()).unwrap_or("-"),
    )
}

/// `TraceLayer` whose spans carry the request id.
pub fn trace_layer(
) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, fn(&Request) -> Span> {
    TraceLayer::new_for_http().make_span_with(make_span as fn(&Request) -> Span)
}

/// Wrap `router` with request-id assignment, tracing and request-id echo.
///
/// Layers added last run first: the id is set before the trace span opens,
/// and copied onto the response on the way out.
pub fn with_request_tracing(router: Router) -> Router {
    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace_layer())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
