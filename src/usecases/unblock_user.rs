use crate::error::Result;
use crate::events::{DomainEvent, EventBus};
use crate::repository::UserBlockRepository;
use crate::usecases::can_communicate;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UnblockUserCommand {
    pub blocker_user_id: Uuid,
    pub blocked_user_id: Uuid,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UnblockUserResult {
    /// False when no block existed (the call is an idempotent no-op).
    pub removed: bool,
    /// Recomputed after the write; still false if the other direction blocks.
    pub can_communicate: bool,
}

/// Permanently removes a directed block. Repeating the call is a no-op
/// success. The lookup is keyed by (blocker, blocked), so a blocked party
/// asking to lift a block placed on them matches no row and falls through
/// to the no-op path; only the original blocker can ever reach the delete.
pub struct UnblockUserUseCase {
    blocks: Arc<dyn UserBlockRepository>,
    events: Arc<dyn EventBus>,
}

impl UnblockUserUseCase {
    pub fn new(blocks: Arc<dyn UserBlockRepository>, events: Arc<dyn EventBus>) -> Self {
        Self { blocks, events }
    }

    pub async fn execute(&self, command: UnblockUserCommand) -> Result<UnblockUserResult> {
        let block = match self
            .blocks
            .find_between(command.blocker_user_id, command.blocked_user_id)
            .await?
        {
            Some(block) => block,
            None => {
                let can_communicate = can_communicate(
                    self.blocks.as_ref(),
                    command.blocker_user_id,
                    command.blocked_user_id,
                )
                .await?;
                return Ok(UnblockUserResult {
                    removed: false,
                    can_communicate,
                });
            }
        };

        self.blocks.delete(block.id).await?;

        tracing::info!(
            block_id = %block.id,
            blocker = %block.blocker_user_id,
            blocked = %block.blocked_user_id,
            reason = ?command.reason,
            "User block removed"
        );

        let event = DomainEvent::UserBlockRemoved {
            block_id: block.id,
            blocker_user_id: block.blocker_user_id,
            blocked_user_id: block.blocked_user_id,
            occurred_at: Utc::now(),
        };
        if let Err(e) = self.events.publish(event).await {
            tracing::warn!(error = %e, "Event publish failed after unblock");
        }

        let can_communicate = can_communicate(
            self.blocks.as_ref(),
            command.blocker_user_id,
            command.blocked_user_id,
        )
        .await?;

        Ok(UnblockUserResult {
            removed: true,
            can_communicate,
        })
    }
}
