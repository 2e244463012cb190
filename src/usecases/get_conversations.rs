use crate::config::MessagingConfig;
use crate::error::{DomainError, Result};
use crate::models::conversation::{Conversation, ConversationStatus};
use crate::repository::{ConversationFilter, ConversationRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct GetConversationsQuery {
    pub user_id: Uuid,
    pub gig_id: Option<Uuid>,
    pub status: Option<ConversationStatus>,
    pub has_unread: Option<bool>,
    pub limit: usize,
    pub offset: usize,
}

/// Per-user projection of one conversation for list views.
#[derive(Debug, Clone)]
pub struct ConversationSummary {
    pub conversation_id: Uuid,
    pub gig_id: Uuid,
    pub other_participant_id: Uuid,
    pub status: ConversationStatus,
    pub unread_count: usize,
    pub last_message_preview: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub started_at: DateTime<Utc>,
}

/// Read side of the conversation aggregate: list a user's threads and fetch
/// a single thread, both participant-gated.
pub struct GetConversationsUseCase {
    conversations: Arc<dyn ConversationRepository>,
    config: MessagingConfig,
}

impl GetConversationsUseCase {
    pub fn new(conversations: Arc<dyn ConversationRepository>, config: MessagingConfig) -> Self {
        Self {
            conversations,
            config,
        }
    }

    pub async fn list(&self, query: GetConversationsQuery) -> Result<Vec<ConversationSummary>> {
        let filter = ConversationFilter {
            gig_id: query.gig_id,
            status: query.status,
            has_unread: query.has_unread,
            limit: Some(query.limit.max(1)),
            offset: Some(query.offset),
        };
        let conversations = self
            .conversations
            .list_for_user(query.user_id, &filter)
            .await?;

        Ok(conversations
            .iter()
            .map(|c| self.summarize(c, query.user_id))
            .collect())
    }

    pub async fn get(&self, conversation_id: Uuid, user_id: Uuid) -> Result<Conversation> {
        let conversation = self
            .conversations
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Conversation {} not found", conversation_id))
            })?;
        if !conversation.has_participant(user_id) {
            return Err(DomainError::Unauthorized(
                "Only participants can view a conversation".to_string(),
            ));
        }
        Ok(conversation)
    }

    fn summarize(&self, conversation: &Conversation, user_id: Uuid) -> ConversationSummary {
        let preview = conversation.last_message().map(|m| {
            m.body
                .chars()
                .take(self.config.preview_length)
                .collect::<String>()
        });
        ConversationSummary {
            conversation_id: conversation.id,
            gig_id: conversation.gig_id,
            // list_for_user only returns threads the user participates in
            other_participant_id: conversation
                .other_participant(user_id)
                .unwrap_or(conversation.contributor_id),
            status: conversation.status,
            unread_count: conversation.unread_count(user_id),
            last_message_preview: preview,
            last_message_at: conversation.last_message_at,
            started_at: conversation.started_at,
        }
    }
}
