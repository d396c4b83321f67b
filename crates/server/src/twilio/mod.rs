//! Twilio Conversations integration.
//!
//! This module provides:
//! - [`ConversationsApi`], the seam the login flow talks to
//! - [`ConversationsClient`], its REST implementation over `reqwest`
//! - Resource types deserialized from the Conversations API
//!
//! Only the three calls the login flow needs are modelled: list conversations,
//! create a conversation, and add a participant.

mod client;
mod error;
mod types;

use async_trait::async_trait;
use video_chat_core::{ConversationSid, Username};

pub use client::ConversationsClient;
pub use error::TwilioError;
pub use types::{Conversation, ParticipantOutcome};

/// Operations on Twilio Conversations used by the login flow.
#[async_trait]
pub trait ConversationsApi: Send + Sync {
    /// List every conversation on the account, following pagination.
    async fn list_conversations(&self) -> Result<Vec<Conversation>, TwilioError>;

    /// Create a conversation with the given display name.
    async fn create_conversation(&self, friendly_name: &str) -> Result<Conversation, TwilioError>;

    /// Add `identity` as a participant of the conversation.
    ///
    /// An identity that is already a participant yields
    /// [`ParticipantOutcome::AlreadyPresent`] rather than an error.
    async fn add_participant(
        &self,
        conversation_sid: &ConversationSid,
        identity: &Username,
    ) -> Result<ParticipantOutcome, TwilioError>;
}
