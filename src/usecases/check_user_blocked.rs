use crate::error::Result;
use crate::repository::UserBlockRepository;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CheckUserBlockedQuery {
    pub user_id_1: Uuid,
    pub user_id_2: Uuid,
}

#[derive(Debug, Clone)]
pub struct BlockStatus {
    /// Block id when user 1 blocks user 2.
    pub user1_blocks_user2: Option<Uuid>,
    /// Block id when user 2 blocks user 1.
    pub user2_blocks_user1: Option<Uuid>,
    /// Both directions blocked.
    pub mutual_block: bool,
    /// False if either direction blocks.
    pub can_communicate: bool,
}

/// Reports the block relation between two users in both directions.
pub struct CheckUserBlockedUseCase {
    blocks: Arc<dyn UserBlockRepository>,
}

impl CheckUserBlockedUseCase {
    pub fn new(blocks: Arc<dyn UserBlockRepository>) -> Self {
        Self { blocks }
    }

    pub async fn execute(&self, query: CheckUserBlockedQuery) -> Result<BlockStatus> {
        let forward = self
            .blocks
            .find_between(query.user_id_1, query.user_id_2)
            .await?;
        let reverse = self
            .blocks
            .find_between(query.user_id_2, query.user_id_1)
            .await?;

        let mutual = forward.is_some() && reverse.is_some();
        Ok(BlockStatus {
            can_communicate: forward.is_none() && reverse.is_none(),
            mutual_block: mutual,
            user1_blocks_user2: forward.map(|b| b.id),
            user2_blocks_user1: reverse.map(|b| b.id),
        })
    }
}
