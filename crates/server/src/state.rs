//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::twilio::{ConversationsApi, ConversationsClient, TwilioError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// immutable configuration and the optional Conversations client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    conversations: Option<Arc<dyn ConversationsApi>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The Twilio Conversations client is only built when all credentials are
    /// present; otherwise chat is disabled and logins issue video-only tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ServerConfig) -> Result<Self, TwilioError> {
        let conversations: Option<Arc<dyn ConversationsApi>> = if config.twilio.is_complete() {
            Some(Arc::new(ConversationsClient::new(&config)?))
        } else {
            tracing::warn!(
                missing = ?config.twilio.missing_vars(),
                "Twilio credentials incomplete, chat is disabled"
            );
            None
        };

        Ok(Self::with_conversations(config, conversations))
    }

    /// Create state with an explicit Conversations implementation.
    #[must_use]
    pub fn with_conversations(
        config: ServerConfig,
        conversations: Option<Arc<dyn ConversationsApi>>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                conversations,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the Conversations client, if chat is enabled.
    #[must_use]
    pub fn conversations(&self) -> Option<&dyn ConversationsApi> {
        self.inner.conversations.as_deref()
    }
}
