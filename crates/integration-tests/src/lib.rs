//! Live integration tests for the video chat token service.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server with real Twilio credentials
//! cargo run -p video-chat-server
//!
//! # Run the ignored live tests against it
//! SERVER_BASE_URL=http://localhost:5000 cargo test -p video-chat-integration-tests -- --ignored
//! ```
//!
//! Every test is `#[ignore]` by default because it talks to a running server,
//! which in turn creates conversations and participants in a real Twilio
//! account.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;

/// Default address of a locally running server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Base URL of the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SERVER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Body returned by a successful `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub conversation_sid: String,
}

/// Claims section of a token, decoded without checking the signature.
///
/// Returns `None` if the token does not have three segments or the payload
/// is not base64url-encoded JSON.
#[must_use]
pub fn unverified_claims(token: &str) -> Option<serde_json::Value> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
