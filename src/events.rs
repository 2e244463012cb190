//! Domain events published after successful persistence. Delivery is
//! at-least-once; consumers must be idempotent. Durable delivery and retry
//! belong to the bus adapter, not this crate.

use crate::error::Result;
use crate::models::user_block::BlockReason;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum DomainEvent {
    ConversationStarted {
        conversation_id: Uuid,
        gig_id: Uuid,
        participants: [Uuid; 2],
        occurred_at: DateTime<Utc>,
    },
    MessageSent {
        conversation_id: Uuid,
        message_id: Uuid,
        gig_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
        occurred_at: DateTime<Utc>,
    },
    MessageRead {
        conversation_id: Uuid,
        message_id: Uuid,
        read_by: Uuid,
        occurred_at: DateTime<Utc>,
    },
    ConversationBlocked {
        conversation_id: Uuid,
        gig_id: Uuid,
        blocked_by: Uuid,
        occurred_at: DateTime<Utc>,
    },
    ConversationUnblocked {
        conversation_id: Uuid,
        gig_id: Uuid,
        unblocked_by: Uuid,
        occurred_at: DateTime<Utc>,
    },
    UserBlockCreated {
        block_id: Uuid,
        blocker_user_id: Uuid,
        blocked_user_id: Uuid,
        reason: BlockReason,
        occurred_at: DateTime<Utc>,
    },
    UserBlockRemoved {
        block_id: Uuid,
        blocker_user_id: Uuid,
        blocked_user_id: Uuid,
        occurred_at: DateTime<Utc>,
    },
    /// Raised exactly once, at the moment the second direction of a block
    /// pair is created. A mutual block is derived, never stored.
    MutualBlockDetected {
        block_id: Uuid,
        reverse_block_id: Uuid,
        user_a: Uuid,
        user_b: Uuid,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::ConversationStarted { .. } => "conversation_started",
            DomainEvent::MessageSent { .. } => "message_sent",
            DomainEvent::MessageRead { .. } => "message_read",
            DomainEvent::ConversationBlocked { .. } => "conversation_blocked",
            DomainEvent::ConversationUnblocked { .. } => "conversation_unblocked",
            DomainEvent::UserBlockCreated { .. } => "user_block_created",
            DomainEvent::UserBlockRemoved { .. } => "user_block_removed",
            DomainEvent::MutualBlockDetected { .. } => "mutual_block_detected",
        }
    }
}

/// Outbound event port implemented by the infrastructure layer.
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: DomainEvent) -> Result<()>;
}
