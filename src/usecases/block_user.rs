use crate::config::BlockLimitsConfig;
use crate::error::{DomainError, Result};
use crate::events::{DomainEvent, EventBus};
use crate::models::user_block::{BlockReason, UserBlock};
use crate::repository::{IdGenerator, ProfileRepository, UserBlockRepository};
use crate::usecases::can_communicate;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct BlockUserCommand {
    pub blocker_user_id: Uuid,
    pub blocked_user_id: Uuid,
    pub reason: BlockReason,
    pub details: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BlockUserResult {
    pub block_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Recomputed after the write; always false immediately after blocking.
    pub can_communicate: bool,
}

/// Creates a directed block after existence, duplicate and anti-abuse
/// checks, and detects the mutual-block condition.
pub struct BlockUserUseCase {
    blocks: Arc<dyn UserBlockRepository>,
    profiles: Arc<dyn ProfileRepository>,
    events: Arc<dyn EventBus>,
    ids: Arc<dyn IdGenerator>,
    limits: BlockLimitsConfig,
}

impl BlockUserUseCase {
    pub fn new(
        blocks: Arc<dyn UserBlockRepository>,
        profiles: Arc<dyn ProfileRepository>,
        events: Arc<dyn EventBus>,
        ids: Arc<dyn IdGenerator>,
        limits: BlockLimitsConfig,
    ) -> Self {
        Self {
            blocks,
            profiles,
            events,
            ids,
            limits,
        }
    }

    pub async fn execute(&self, command: BlockUserCommand) -> Result<BlockUserResult> {
        if command.blocker_user_id == command.blocked_user_id {
            return Err(DomainError::Validation(
                "Users cannot block themselves".to_string(),
            ));
        }

        self.ensure_profile_exists(command.blocker_user_id).await?;
        self.ensure_profile_exists(command.blocked_user_id).await?;

        if self
            .blocks
            .find_between(command.blocker_user_id, command.blocked_user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "You have already blocked this user".to_string(),
            ));
        }

        self.enforce_limits(command.blocker_user_id).await?;

        let block = UserBlock::new(
            self.ids.generate(),
            command.blocker_user_id,
            command.blocked_user_id,
            command.reason,
            command.details,
        )?;
        // The storage uniqueness constraint backstops the duplicate check
        // above under concurrent blockers.
        self.blocks.save(&block).await?;

        tracing::info!(
            block_id = %block.id,
            blocker = %block.blocker_user_id,
            blocked = %block.blocked_user_id,
            reason = %block.reason.as_str(),
            "User block created"
        );

        // Mutual block is a derived fact, detected exactly when the second
        // direction appears.
        if let Some(reverse) = self
            .blocks
            .find_between(command.blocked_user_id, command.blocker_user_id)
            .await?
        {
            self.publish(DomainEvent::MutualBlockDetected {
                block_id: block.id,
                reverse_block_id: reverse.id,
                user_a: block.blocker_user_id,
                user_b: block.blocked_user_id,
                occurred_at: Utc::now(),
            })
            .await;
        }

        self.publish(DomainEvent::UserBlockCreated {
            block_id: block.id,
            blocker_user_id: block.blocker_user_id,
            blocked_user_id: block.blocked_user_id,
            reason: block.reason,
            occurred_at: block.created_at,
        })
        .await;

        let can_communicate = can_communicate(
            self.blocks.as_ref(),
            command.blocker_user_id,
            command.blocked_user_id,
        )
        .await?;

        Ok(BlockUserResult {
            block_id: block.id,
            created_at: block.created_at,
            can_communicate,
        })
    }

    async fn ensure_profile_exists(&self, user_id: Uuid) -> Result<()> {
        self.profiles
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Profile {} not found", user_id)))?;
        Ok(())
    }

    async fn enforce_limits(&self, blocker: Uuid) -> Result<()> {
        let now = Utc::now();

        let daily = self
            .blocks
            .count_created_since(blocker, now - Duration::days(1))
            .await?;
        if daily >= self.limits.max_blocks_per_day as u64 {
            return Err(DomainError::BlockLimitExceeded {
                window: "day",
                max: self.limits.max_blocks_per_day,
            });
        }

        let monthly = self
            .blocks
            .count_created_since(blocker, now - Duration::days(30))
            .await?;
        if monthly >= self.limits.max_blocks_per_month as u64 {
            return Err(DomainError::BlockLimitExceeded {
                window: "month",
                max: self.limits.max_blocks_per_month,
            });
        }

        let total = self.blocks.count_for_blocker(blocker).await?;
        if total >= self.limits.max_total_blocks as u64 {
            return Err(DomainError::BlockLimitExceeded {
                window: "account",
                max: self.limits.max_total_blocks,
            });
        }

        Ok(())
    }

    async fn publish(&self, event: DomainEvent) {
        let name = event.name();
        if let Err(e) = self.events.publish(event).await {
            tracing::warn!(event = name, error = %e, "Event publish failed");
        }
    }
}
