use crate::error::{DomainError, Result};
use crate::events::DomainEvent;
use crate::models::message::{Attachment, Message};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Active,
    Blocked,
    Archived,
}

impl ConversationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationStatus::Active => "active",
            ConversationStatus::Blocked => "blocked",
            ConversationStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gig-scoped thread between the gig owner (contributor) and one applicant
/// (talent). The conversation owns its messages; participants never change
/// after creation. Conversations are never deleted, only archived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub contributor_id: Uuid,
    pub talent_id: Uuid,
    pub messages: Vec<Message>,
    pub status: ConversationStatus,
    pub started_at: DateTime<Utc>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub blocked_by: Option<Uuid>,
    pub blocked_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pending_events: Vec<DomainEvent>,
}

impl Conversation {
    /// Start a new conversation. Created lazily on the first message between
    /// a gig owner and an applicant.
    pub fn start(id: Uuid, gig_id: Uuid, contributor_id: Uuid, talent_id: Uuid) -> Self {
        let started_at = Utc::now();
        let mut conversation = Self {
            id,
            gig_id,
            contributor_id,
            talent_id,
            messages: Vec::new(),
            status: ConversationStatus::Active,
            started_at,
            last_message_at: None,
            blocked_by: None,
            blocked_at: None,
            pending_events: Vec::new(),
        };
        conversation.pending_events.push(DomainEvent::ConversationStarted {
            conversation_id: id,
            gig_id,
            participants: [contributor_id, talent_id],
            occurred_at: started_at,
        });
        conversation
    }

    pub fn participants(&self) -> [Uuid; 2] {
        [self.contributor_id, self.talent_id]
    }

    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.contributor_id == user_id || self.talent_id == user_id
    }

    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        if user_id == self.contributor_id {
            Some(self.talent_id)
        } else if user_id == self.talent_id {
            Some(self.contributor_id)
        } else {
            None
        }
    }

    /// Append a message to the conversation. Only valid while the
    /// conversation is active and the sender is a participant.
    pub fn send_message(
        &mut self,
        message_id: Uuid,
        from_user_id: Uuid,
        body: String,
        attachments: Vec<Attachment>,
        max_body_length: usize,
    ) -> Result<&Message> {
        if !self.has_participant(from_user_id) {
            return Err(DomainError::Unauthorized(
                "Sender is not a participant in this conversation".to_string(),
            ));
        }
        if self.status != ConversationStatus::Active {
            return Err(DomainError::ConversationNotActive(self.status));
        }
        // has_participant above guarantees the lookup succeeds
        let to_user_id = self
            .other_participant(from_user_id)
            .ok_or_else(|| DomainError::Validation("Could not determine recipient".to_string()))?;

        let message = Message::new(
            message_id,
            self.id,
            from_user_id,
            to_user_id,
            body,
            attachments,
            max_body_length,
        )?;
        let sent_at = message.sent_at;
        let index = self.messages.len();
        self.messages.push(message);
        self.last_message_at = Some(sent_at);

        self.pending_events.push(DomainEvent::MessageSent {
            conversation_id: self.id,
            message_id,
            gig_id: self.gig_id,
            from_user_id,
            to_user_id,
            occurred_at: sent_at,
        });

        Ok(&self.messages[index])
    }

    /// Mark a message as read. Only the recipient may do this.
    pub fn mark_message_read(&mut self, message_id: Uuid, user_id: Uuid) -> Result<()> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("Message {} not in conversation", message_id))
            })?;
        if !message.is_to(user_id) {
            return Err(DomainError::Unauthorized(
                "Only the recipient can mark a message as read".to_string(),
            ));
        }
        message.mark_read();

        self.pending_events.push(DomainEvent::MessageRead {
            conversation_id: self.id,
            message_id,
            read_by: user_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Block the conversation. Only valid from the active state.
    pub fn block(&mut self, user_id: Uuid) -> Result<()> {
        if !self.has_participant(user_id) {
            return Err(DomainError::Unauthorized(
                "Only participants can block a conversation".to_string(),
            ));
        }
        if self.status != ConversationStatus::Active {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: ConversationStatus::Blocked,
            });
        }

        self.status = ConversationStatus::Blocked;
        self.blocked_by = Some(user_id);
        self.blocked_at = Some(Utc::now());

        self.pending_events.push(DomainEvent::ConversationBlocked {
            conversation_id: self.id,
            gig_id: self.gig_id,
            blocked_by: user_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Unblock the conversation. Only the user who blocked it may do this.
    pub fn unblock(&mut self, user_id: Uuid) -> Result<()> {
        if self.status != ConversationStatus::Blocked {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: ConversationStatus::Active,
            });
        }
        if self.blocked_by != Some(user_id) {
            return Err(DomainError::Unauthorized(
                "Only the user who blocked the conversation can unblock it".to_string(),
            ));
        }

        self.status = ConversationStatus::Active;
        self.blocked_by = None;
        self.blocked_at = None;

        self.pending_events.push(DomainEvent::ConversationUnblocked {
            conversation_id: self.id,
            gig_id: self.gig_id,
            unblocked_by: user_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Archive the conversation. Terminal: an archived conversation never
    /// returns to active.
    pub fn archive(&mut self, user_id: Uuid) -> Result<()> {
        if !self.has_participant(user_id) {
            return Err(DomainError::Unauthorized(
                "Only participants can archive a conversation".to_string(),
            ));
        }
        if self.status != ConversationStatus::Active {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: ConversationStatus::Archived,
            });
        }
        self.status = ConversationStatus::Archived;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == ConversationStatus::Active
    }

    pub fn unread_messages(&self, user_id: Uuid) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(move |m| m.is_to(user_id) && !m.is_read())
    }

    pub fn unread_count(&self, user_id: Uuid) -> usize {
        self.unread_messages(user_id).count()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Drain events accumulated since the last persistence. Callers publish
    /// these after a successful save.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
