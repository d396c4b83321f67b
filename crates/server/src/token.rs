//! Twilio access tokens.
//!
//! An access token is an HS256 JWT signed with the API key secret. Grants
//! carried in the `grants` claim authorize the holder's identity to use
//! individual Twilio products.
//!
//! ```text
//! header: {"alg":"HS256","typ":"JWT","cty":"twilio-fpa;v=1"}
//! claims: {"jti":"SK...-<iat>","iss":"SK...","sub":"AC...","iat":..,"nbf":..,"exp":..,
//!          "grants":{"identity":"alice","video":{"room":"My Room"},"chat":{"service_sid":"IS..."}}}
//! ```

use std::time::Duration;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use video_chat_core::{ChatServiceSid, Username};

use crate::config::TwilioCredentials;

/// Content type Twilio requires in the JWT header.
pub const CONTENT_TYPE: &str = "twilio-fpa;v=1";

/// Video room every token is scoped to, independent of the chat room name.
pub const VIDEO_ROOM: &str = "My Room";

/// Errors that can occur when minting an access token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// JWT encoding or signing failed.
    #[error("Token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Grant for Programmable Video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoGrant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl VideoGrant {
    /// Grant access to a single named room.
    #[must_use]
    pub fn room(room: impl Into<String>) -> Self {
        Self {
            room: Some(room.into()),
        }
    }
}

/// Grant for the Chat service backing a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatGrant {
    pub service_sid: ChatServiceSid,
}

impl ChatGrant {
    #[must_use]
    pub const fn new(service_sid: ChatServiceSid) -> Self {
        Self { service_sid }
    }
}

/// A capability that can be added to an [`AccessToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    Video(VideoGrant),
    Chat(ChatGrant),
}

impl From<VideoGrant> for Grant {
    fn from(grant: VideoGrant) -> Self {
        Self::Video(grant)
    }
}

impl From<ChatGrant> for Grant {
    fn from(grant: ChatGrant) -> Self {
        Self::Chat(grant)
    }
}

/// The `grants` claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grants {
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoGrant>,
    /// Emitted as `chat`, which replaces the legacy `ip_messaging` key for the same grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatGrant>,
}

impl Grants {
    /// Number of product grants present (identity is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.video.is_some()) + usize::from(self.chat.is_some())
    }

    /// Returns `true` if no product grant is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.video.is_none() && self.chat.is_none()
    }
}

/// JWT claims of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub jti: String,
    /// API key SID.
    pub iss: String,
    /// Account SID.
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub grants: Grants,
}

/// Access token under construction.
///
/// Built fresh for each login and signed once with [`AccessToken::to_jwt`].
pub struct AccessToken {
    account_sid: String,
    api_key_sid: String,
    api_key_secret: SecretString,
    ttl: Duration,
    grants: Grants,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("account_sid", &self.account_sid)
            .field("api_key_sid", &self.api_key_sid)
            .field("api_key_secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .field("grants", &self.grants)
            .finish()
    }
}

impl AccessToken {
    /// Start a token for `identity` with no grants.
    #[must_use]
    pub fn new(credentials: &TwilioCredentials, identity: &Username, ttl: Duration) -> Self {
        Self {
            account_sid: credentials.account_sid.clone(),
            api_key_sid: credentials.api_key_sid.clone(),
            api_key_secret: credentials.api_key_secret.clone(),
            ttl,
            grants: Grants {
                identity: identity.as_str().to_owned(),
                video: None,
                chat: None,
            },
        }
    }

    /// Add a grant, replacing any earlier grant of the same product.
    pub fn add_grant(&mut self, grant: impl Into<Grant>) -> &mut Self {
        match grant.into() {
            Grant::Video(video) => self.grants.video = Some(video),
            Grant::Chat(chat) => self.grants.chat = Some(chat),
        }
        self
    }

    /// Grants added so far.
    #[must_use]
    pub const fn grants(&self) -> &Grants {
        &self.grants
    }

    /// Build the claims for a token issued at `now` (Unix seconds).
    #[must_use]
    pub fn claims_at(&self, now: i64) -> Claims {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);

        Claims {
            jti: format!("{}-{now}", self.api_key_sid),
            iss: self.api_key_sid.clone(),
            sub: self.account_sid.clone(),
            iat: now,
            nbf: now,
            exp: now.saturating_add(ttl),
            grants: self.grants.clone(),
        }
    }

    /// Sign the token and return the compact JWT string.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if the claims cannot be encoded.
    pub fn to_jwt(&self) -> Result<String, TokenError> {
        let mut header = Header::new(Algorithm::HS256);
        header.cty = Some(CONTENT_TYPE.to_string());

        let claims = self.claims_at(chrono::Utc::now().timestamp());
        let key = EncodingKey::from_secret(self.api_key_secret.expose_secret().as_bytes());

        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }
}
