//! Request correlation IDs.
//!
//! An upstream `x-request-id` is kept when it is a usable header value;
//! otherwise a UUID v4 is minted. The ID ends up on the request span, the
//! Sentry scope and the response.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID accepted verbatim.
const MAX_UPSTREAM_LEN: usize = 128;

/// Attach a request ID to the span, the Sentry scope and the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request_id_for(request.headers());

    Span::current().record("request_id", request_id.to_str().unwrap_or_default());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", request_id.to_str().unwrap_or_default());
    });

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    response
}

/// Upstream ID if present, non-blank and short enough, else a fresh UUID.
fn request_id_for(headers: &HeaderMap) -> HeaderValue {
    headers
        .get(REQUEST_ID_HEADER)
        .filter(|value| {
            value
                .to_str()
                .is_ok_and(|id| !id.trim().is_empty() && id.len() <= MAX_UPSTREAM_LEN)
        })
        .cloned()
        .unwrap_or_else(generate)
}

fn generate() -> HeaderValue {
    let id = Uuid::new_v4().to_string();
    // A hyphenated UUID is always a valid header value.
    HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
        headers
    }

    #[test]
    fn test_upstream_id_is_kept() {
        assert_eq!(request_id_for(&headers_with("req-123")), "req-123");
    }

    #[test]
    fn test_missing_id_is_generated() {
        let id = request_id_for(&HeaderMap::new());
        assert!(id.to_str().is_ok_and(|id| Uuid::parse_str(id).is_ok()));
    }

    #[test]
    fn test_blank_or_oversized_id_is_replaced() {
        for upstream in ["   ".to_string(), "x".repeat(MAX_UPSTREAM_LEN + 1)] {
            let id = request_id_for(&headers_with(&upstream));
            assert!(
                id.to_str().is_ok_and(|id| Uuid::parse_str(id).is_ok()),
                "{upstream:?} should be replaced"
            );
        }
    }
}
