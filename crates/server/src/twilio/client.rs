//! Twilio Conversations REST client.
//!
//! Authenticates with HTTP Basic auth using the API key SID and secret.
//! Writes are form-encoded as the Twilio REST API expects.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use video_chat_core::{ConversationSid, Username};

use super::ConversationsApi;
use super::error::TwilioError;
use super::types::{ApiErrorBody, Conversation, ConversationPage, ParticipantOutcome};
use crate::config::ServerConfig;

/// Conversations API base URL.
const BASE_URL: &str = "https://conversations.twilio.com/v1";

/// Page size requested when listing conversations (API maximum is 100).
const PAGE_SIZE: u32 = 50;

/// Twilio Conversations API client.
#[derive(Clone)]
pub struct ConversationsClient {
    client: Client,
    base_url: String,
    api_key_sid: String,
    api_key_secret: SecretString,
}

impl std::fmt::Debug for ConversationsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationsClient")
            .field("base_url", &self.base_url)
            .field("api_key_sid", &self.api_key_sid)
            .field("api_key_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl ConversationsClient {
    /// Create a new client from the server configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ServerConfig) -> Result<Self, TwilioError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            api_key_sid: config.twilio.api_key_sid.clone(),
            api_key_secret: config.twilio.api_key_secret.clone(),
        })
    }

    /// Point the client at a different API root (e.g. a local stub).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_page(&self, url: &str) -> Result<ConversationPage, TwilioError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.api_key_sid, Some(self.api_key_secret.expose_secret()))
            .send()
            .await?;

        let response = ensure_success(response).await?;

        response
            .json()
            .await
            .map_err(|e| TwilioError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ConversationsApi for ConversationsClient {
    #[instrument(skip(self))]
    async fn list_conversations(&self) -> Result<Vec<Conversation>, TwilioError> {
        let mut conversations = Vec::new();
        let mut next_url = Some(format!(
            "{}/Conversations?PageSize={PAGE_SIZE}",
            self.base_url
        ));

        while let Some(url) = next_url {
            let page = self.get_page(&url).await?;
            conversations.extend(page.conversations);
            next_url = page.meta.next_page_url;
        }

        debug!(count = conversations.len(), "Listed conversations");
        Ok(conversations)
    }

    #[instrument(skip(self))]
    async fn create_conversation(&self, friendly_name: &str) -> Result<Conversation, TwilioError> {
        let response = self
            .client
            .post(format!("{}/Conversations", self.base_url))
            .basic_auth(&self.api_key_sid, Some(self.api_key_secret.expose_secret()))
            .form(&[("FriendlyName", friendly_name)])
            .send()
            .await?;

        let conversation: Conversation = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| TwilioError::Parse(e.to_string()))?;

        debug!(sid = %conversation.sid, "Created conversation");
        Ok(conversation)
    }

    #[instrument(skip_all, fields(conversation_sid = %conversation_sid, identity = %identity))]
    async fn add_participant(
        &self,
        conversation_sid: &ConversationSid,
        identity: &Username,
    ) -> Result<ParticipantOutcome, TwilioError> {
        let response = self
            .client
            .post(format!(
                "{}/Conversations/{conversation_sid}/Participants",
                self.base_url
            ))
            .basic_auth(&self.api_key_sid, Some(self.api_key_secret.expose_secret()))
            .form(&[("Identity", identity.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Ok(ParticipantOutcome::AlreadyPresent);
        }

        ensure_success(response).await?;
        Ok(ParticipantOutcome::Added)
    }
}

/// Pass successful responses through, convert the rest into `TwilioError::Api`.
async fn ensure_success(response: Response) -> Result<Response, TwilioError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

/// Build an API error from a status code and the raw error body.
fn api_error(status: u16, body: &str) -> TwilioError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(error) => TwilioError::Api {
            status,
            code: error.code,
            message: error.message,
        },
        Err(_) => TwilioError::Api {
            status,
            code: None,
            message: body.to_string(),
        },
    }
}
