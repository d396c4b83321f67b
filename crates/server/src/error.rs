//! Request errors and their HTTP mapping.
//!
//! Handlers return [`Result<T>`]. Client mistakes become 4xx responses with a
//! readable message; everything else is reported to Sentry and answered with
//! a generic 500 so platform details never reach the browser.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::token::TokenError;
use crate::twilio::TwilioError;

/// Body sent to clients alongside failed requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Login body had no usable `username`.
    #[error("username is required")]
    MissingUsername,

    /// Login body was not a JSON object.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// A Conversations API call failed.
    #[error("Twilio error: {0}")]
    Twilio(#[from] TwilioError),

    /// Access token could not be signed.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl AppError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingUsername => StatusCode::UNAUTHORIZED,
            Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Twilio(_) | Self::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the client.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    fn report(&self) {
        let twilio_status = match self {
            Self::Twilio(err) => err.status(),
            _ => None,
        };

        let event_id = sentry::with_scope(
            |scope| {
                if let Some(status) = twilio_status {
                    scope.set_tag("twilio_status", status);
                }
            },
            || sentry::capture_error(self),
        );

        tracing::error!(
            error = %self,
            twilio_status,
            sentry_event_id = %event_id,
            "Request failed"
        );
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            self.report();
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
