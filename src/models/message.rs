use crate::error::{DomainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File attached to a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

/// A single message, owned exclusively by its conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub body: String,
    pub attachments: Vec<Attachment>,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub edited_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(
        id: Uuid,
        conversation_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
        body: String,
        attachments: Vec<Attachment>,
        max_body_length: usize,
    ) -> Result<Self> {
        if body.trim().is_empty() {
            return Err(DomainError::Validation(
                "Message body must not be empty".to_string(),
            ));
        }
        let length = body.chars().count();
        if length > max_body_length {
            return Err(DomainError::Validation(format!(
                "Message body is {} characters, the limit is {}",
                length, max_body_length
            )));
        }

        Ok(Self {
            id,
            conversation_id,
            from_user_id,
            to_user_id,
            body,
            attachments,
            sent_at: Utc::now(),
            read_at: None,
            edited_at: None,
            deleted_at: None,
        })
    }

    pub fn is_to(&self, user_id: Uuid) -> bool {
        self.to_user_id == user_id
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    pub fn mark_read(&mut self) {
        if self.read_at.is_none() {
            self.read_at = Some(Utc::now());
        }
    }
}
