use crate::models::conversation::ConversationStatus;
use crate::models::moderation::ModerationReason;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Blocking limit exceeded: at most {max} blocks per {window}")]
    BlockLimitExceeded { window: &'static str, max: u32 },

    #[error("Invalid conversation status transition: {from} -> {to}")]
    InvalidStatusTransition {
        from: ConversationStatus,
        to: ConversationStatus,
    },

    #[error("Conversation is {0}, messages can only be sent while it is active")]
    ConversationNotActive(ConversationStatus),

    #[error("Content rejected: {reasons:?}")]
    ContentRejected { reasons: Vec<ModerationReason> },

    #[error("Content flagged for review")]
    ContentFlagged,

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Event publish error: {0}")]
    EventPublish(String),
}

impl DomainError {
    /// Conflict-family errors are safe to surface as retry decisions to the caller.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::Conflict(_) | DomainError::BlockLimitExceeded { .. }
        )
    }

    /// Content-moderation rejections form their own family so callers can
    /// render a specific "your message could not be sent" response.
    pub fn is_moderation_rejection(&self) -> bool {
        matches!(
            self,
            DomainError::ContentRejected { .. } | DomainError::ContentFlagged
        )
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
