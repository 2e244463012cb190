use crate::config::BlockLimitsConfig;
use crate::error::Result;
use crate::models::user_block::BlockReason;
use crate::repository::{BlockSort, ProfileRepository, UserBlockRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct GetBlockedUsersQuery {
    pub requesting_user_id: Uuid,
    pub limit: usize,
    pub offset: usize,
    pub sort: BlockSort,
}

/// One entry in the caller's block list, enriched with the blocked user's
/// display data where the profile still exists.
#[derive(Debug, Clone)]
pub struct BlockedUserView {
    pub block_id: Uuid,
    pub blocked_user_id: Uuid,
    pub reason: BlockReason,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub age_in_days: i64,
    pub is_recent: bool,
    pub display_name: Option<String>,
    pub handle: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GetBlockedUsersResult {
    pub blocks: Vec<BlockedUserView>,
    pub total_count: u64,
    pub has_more: bool,
}

/// Lists the caller's own blocks (never who blocked the caller).
pub struct GetBlockedUsersUseCase {
    blocks: Arc<dyn UserBlockRepository>,
    profiles: Arc<dyn ProfileRepository>,
    limits: BlockLimitsConfig,
}

impl GetBlockedUsersUseCase {
    pub fn new(
        blocks: Arc<dyn UserBlockRepository>,
        profiles: Arc<dyn ProfileRepository>,
        limits: BlockLimitsConfig,
    ) -> Self {
        Self {
            blocks,
            profiles,
            limits,
        }
    }

    pub async fn execute(&self, query: GetBlockedUsersQuery) -> Result<GetBlockedUsersResult> {
        let limit = query.limit.max(1);
        let rows = self
            .blocks
            .list_for_blocker(query.requesting_user_id, query.sort, limit, query.offset)
            .await?;
        let total_count = self
            .blocks
            .count_for_blocker(query.requesting_user_id)
            .await?;
        let has_more = (query.offset + rows.len()) < total_count as usize;

        let now = Utc::now();
        let mut views = Vec::with_capacity(rows.len());
        for block in rows {
            // A deleted profile leaves the display fields empty rather than
            // hiding the block itself.
            let profile = self.profiles.find_by_user_id(block.blocked_user_id).await?;
            views.push(BlockedUserView {
                block_id: block.id,
                blocked_user_id: block.blocked_user_id,
                reason: block.reason,
                details: block.details.clone(),
                created_at: block.created_at,
                age_in_days: block.age_in_days(now),
                is_recent: block.is_recent(now, self.limits.recent_window_days),
                display_name: profile.as_ref().map(|p| p.display_name.clone()),
                handle: profile.as_ref().map(|p| p.handle.clone()),
                avatar_url: profile.and_then(|p| p.avatar_url),
            });
        }

        Ok(GetBlockedUsersResult {
            blocks: views,
            total_count,
            has_more,
        })
    }
}
