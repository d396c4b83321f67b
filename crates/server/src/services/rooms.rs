//! Chat room resolution and membership.
//!
//! The room is looked up by display name on every login and created on first
//! use. Lookup and creation are two separate calls, so two first logins racing
//! each other can both create a conversation with the same name.

use tracing::{debug, info, instrument};
use video_chat_core::{RoomName, Username};

use crate::twilio::{Conversation, ConversationsApi, ParticipantOutcome, TwilioError};

/// Return the conversation named `name`, creating it if none exists.
///
/// Returns `Ok(None)` when `api` is `None` (chat disabled).
///
/// # Errors
///
/// Returns `TwilioError` if listing or creating conversations fails.
#[instrument(skip_all, fields(room = %name))]
pub async fn resolve_or_create(
    api: Option<&dyn ConversationsApi>,
    name: &RoomName,
) -> Result<Option<Conversation>, TwilioError> {
    let Some(api) = api else {
        return Ok(None);
    };

    let existing = api
        .list_conversations()
        .await?
        .into_iter()
        .find(|conversation| conversation.is_named(name.as_str()));

    if let Some(conversation) = existing {
        debug!(sid = %conversation.sid, "Found existing conversation");
        return Ok(Some(conversation));
    }

    let conversation = api.create_conversation(name.as_str()).await?;
    info!(sid = %conversation.sid, "Created conversation for room");
    Ok(Some(conversation))
}

/// Add `username` to the conversation, treating existing membership as success.
///
/// # Errors
///
/// Returns `TwilioError` for any failure other than the duplicate-participant
/// conflict.
#[instrument(skip(api, conversation), fields(sid = %conversation.sid))]
pub async fn join(
    api: &dyn ConversationsApi,
    conversation: &Conversation,
    username: &Username,
) -> Result<(), TwilioError> {
    match api.add_participant(&conversation.sid, username).await? {
        ParticipantOutcome::Added => debug!("Participant added"),
        ParticipantOutcome::AlreadyPresent => debug!("Participant already in conversation"),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use video_chat_core::{ChatServiceSid, ConversationSid};

    use super::*;

    /// In-memory conversation store.
    #[derive(Default)]
    struct FakeConversations {
        conversations: Mutex<Vec<Conversation>>,
        creates: AtomicUsize,
        fail_participants: bool,
    }

    impl FakeConversations {
        fn with_names(names: &[&str]) -> Self {
            let conversations = names
                .iter()
                .enumerate()
                .map(|(i, name)| Conversation {
                    sid: ConversationSid::new(format!("CH{i}")),
                    friendly_name: Some((*name).to_string()),
                    chat_service_sid: ChatServiceSid::new("IS0"),
                })
                .collect();
            Self {
                conversations: Mutex::new(conversations),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ConversationsApi for FakeConversations {
        async fn list_conversations(&self) -> Result<Vec<Conversation>, TwilioError> {
            Ok(self.conversations.lock().unwrap().clone())
        }

        async fn create_conversation(
            &self,
            friendly_name: &str,
        ) -> Result<Conversation, TwilioError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            let mut conversations = self.conversations.lock().unwrap();
            let conversation = Conversation {
                sid: ConversationSid::new(format!("CH{}", conversations.len())),
                friendly_name: Some(friendly_name.to_string()),
                chat_service_sid: ChatServiceSid::new("IS0"),
            };
            conversations.push(conversation.clone());
            Ok(conversation)
        }

        async fn add_participant(
            &self,
            _conversation_sid: &ConversationSid,
            _identity: &Username,
        ) -> Result<ParticipantOutcome, TwilioError> {
            if self.fail_participants {
                return Err(TwilioError::Api {
                    status: 500,
                    code: None,
                    message: "boom".to_string(),
                });
            }
            Ok(ParticipantOutcome::AlreadyPresent)
        }
    }

    #[tokio::test]
    async fn test_resolves_existing_conversation() {
        let api = FakeConversations::with_names(&["Alpha", "Beta"]);

        let conversation = resolve_or_create(Some(&api), &RoomName::new("Beta"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(conversation.sid.as_str(), "CH1");
        assert!(conversation.is_named("Beta"));
        assert_eq!(api.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_creates_missing_conversation() {
        let api = FakeConversations::with_names(&["Alpha", "Beta"]);

        let conversation = resolve_or_create(Some(&api), &RoomName::new("Gamma"))
            .await
            .unwrap()
            .unwrap();

        assert!(conversation.is_named("Gamma"));
        assert_eq!(conversation.sid.as_str(), "CH2");
        assert_eq!(api.creates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_match_is_case_sensitive() {
        let api = FakeConversations::with_names(&["beta"]);

        let conversation = resolve_or_create(Some(&api), &RoomName::new("Beta"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(conversation.sid.as_str(), "CH1");
        assert_eq!(api.creates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_second_resolve_reuses_created_conversation() {
        let api = FakeConversations::default();
        let room = RoomName::default();

        let first = resolve_or_create(Some(&api), &room).await.unwrap().unwrap();
        let second = resolve_or_create(Some(&api), &room).await.unwrap().unwrap();

        assert_eq!(first.sid, second.sid);
        assert_eq!(api.creates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_client_resolves_nothing() {
        let result = resolve_or_create(None, &RoomName::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_join_tolerates_existing_membership() {
        let api = FakeConversations::with_names(&["My Room"]);
        let conversation = api.list_conversations().await.unwrap().remove(0);

        let result = join(&api, &conversation, &Username::parse("alice").unwrap()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_join_propagates_other_errors() {
        let api = FakeConversations {
            fail_participants: true,
            ..FakeConversations::with_names(&["My Room"])
        };
        let conversation = api.list_conversations().await.unwrap().remove(0);

        let result = join(&api, &conversation, &Username::parse("alice").unwrap()).await;
        assert!(matches!(result, Err(TwilioError::Api { status: 500, .. })));
    }
}
