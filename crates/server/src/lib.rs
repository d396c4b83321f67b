//! Video chat token service library.
//!
//! Issues Twilio access tokens for a video room and makes sure the configured
//! chat conversation exists with the user as a participant. The crate is a
//! library so the router can be driven in tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod token;
pub mod twilio;

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
    middleware::from_fn,
    routing::get,
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::{Span, field};

use state::AppState;

/// Build the application router with its middleware stack.
///
/// Sentry layers are not included; the binary wraps them around this router.
pub fn app(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(request_span)
        .on_response(record_response);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(from_fn(middleware::request_id_middleware))
        .layer(trace)
        .with_state(state)
}

/// Span for one request; `request_id` is filled in by the request-id layer.
fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = request.uri().path(),
        request_id = field::Empty,
        status = field::Empty,
        latency_ms = field::Empty,
    )
}

fn record_response(response: &Response<Body>, latency: Duration, span: &Span) {
    span.record("status", response.status().as_u16());
    span.record(
        "latency_ms",
        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
    );
    DefaultOnResponse::default().on_response(response, latency, span);
}

/// Liveness probe. Never calls Twilio.
async fn health() -> &'static str {
    "ok"
}
