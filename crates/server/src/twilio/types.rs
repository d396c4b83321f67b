//! Conversations API resource types.

use serde::{Deserialize, Serialize};
use video_chat_core::{ChatServiceSid, ConversationSid};

/// Conversation resource.
///
/// Only the fields the login flow reads are kept; the rest of the resource is
/// ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub sid: ConversationSid,
    /// Display name; Twilio allows it to be null.
    pub friendly_name: Option<String>,
    /// Chat service backing the conversation, scopes the chat grant.
    pub chat_service_sid: ChatServiceSid,
}

impl Conversation {
    /// Exact, case-sensitive comparison of the display name.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.friendly_name.as_deref() == Some(name)
    }
}

/// Result of adding a participant to a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantOutcome {
    /// The participant was created.
    Added,
    /// The identity was already a participant (HTTP 409).
    AlreadyPresent,
}

/// Page of the conversation list endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct ConversationPage {
    pub conversations: Vec<Conversation>,
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Deserialize)]
pub(super) struct PageMeta {
    pub next_page_url: Option<String>,
}

/// Error body returned by the REST API on failure.
#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorBody {
    pub code: Option<u32>,
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_conversation_from_resource() {
        let resource = json!({
            "account_sid": "AC123",
            "chat_service_sid": "IS456",
            "messaging_service_sid": "MG789",
            "sid": "CH001",
            "friendly_name": "My Room",
            "unique_name": null,
            "state": "active",
            "url": "https://conversations.twilio.com/v1/Conversations/CH001"
        });

        let conversation: Conversation = serde_json::from_value(resource).unwrap();
        assert_eq!(conversation.sid.as_str(), "CH001");
        assert_eq!(conversation.chat_service_sid.as_str(), "IS456");
        assert!(conversation.is_named("My Room"));
        assert!(!conversation.is_named("my room"));
    }

    #[test]
    fn test_unnamed_conversation_matches_nothing() {
        let conversation: Conversation = serde_json::from_value(json!({
            "sid": "CH002",
            "friendly_name": null,
            "chat_service_sid": "IS456"
        }))
        .unwrap();

        assert!(!conversation.is_named(""));
    }

    #[test]
    fn test_page_meta() {
        let page: ConversationPage = serde_json::from_value(json!({
            "conversations": [],
            "meta": {
                "page": 0,
                "page_size": 50,
                "next_page_url": null,
                "key": "conversations"
            }
        }))
        .unwrap();

        assert!(page.conversations.is_empty());
        assert!(page.meta.next_page_url.is_none());
    }
}
