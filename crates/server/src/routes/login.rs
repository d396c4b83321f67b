//! Login route handler.
//!
//! Issues an access token for the submitted username and makes sure the user
//! is a participant of the configured chat conversation.

use axum::{Json, body::Bytes, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use video_chat_core::Username;

use crate::error::{AppError, Result};
use crate::services::rooms;
use crate::state::AppState;
use crate::token::{AccessToken, ChatGrant, VIDEO_ROOM, VideoGrant};

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
}

impl LoginRequest {
    /// Parse a request body as JSON, whatever its declared content type.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MalformedBody` if the body is not a JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| AppError::MalformedBody(e.to_string()))
    }

    /// The validated username.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MissingUsername` if the username is missing or empty.
    pub fn username(&self) -> Result<Username> {
        let username = self.username.as_deref().ok_or(AppError::MissingUsername)?;
        Username::parse(username).map_err(|_| AppError::MissingUsername)
    }
}

/// Login response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub token: String,
    /// SID of the chat conversation, empty when chat is disabled.
    pub conversation_sid: String,
}

/// Issue an access token and join the chat room.
#[instrument(skip_all)]
pub async fn login(State(state): State<AppState>, body: Bytes) -> Result<Json<LoginResponse>> {
    let username = LoginRequest::from_body(&body)?.username()?;
    let config = state.config();

    let conversation = rooms::resolve_or_create(state.conversations(), &config.chat_room).await?;

    let mut token = AccessToken::new(&config.twilio, &username, config.token_ttl);
    token.add_grant(VideoGrant::room(VIDEO_ROOM));

    let conversation_sid = match (state.conversations(), conversation) {
        (Some(api), Some(conversation)) => {
            rooms::join(api, &conversation, &username).await?;
            token.add_grant(ChatGrant::new(conversation.chat_service_sid));
            conversation.sid.into_inner()
        }
        _ => String::new(),
    };

    let token = token.to_jwt()?;
    info!(%username, %conversation_sid, "Issued access token");

    Ok(Json(LoginResponse {
        token,
        conversation_sid,
    }))
}
