use crate::error::{DomainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a user blocked another user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    Harassment,
    Spam,
    Inappropriate,
    Scam,
    Other,
}

impl BlockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockReason::Harassment => "harassment",
            BlockReason::Spam => "spam",
            BlockReason::Inappropriate => "inappropriate",
            BlockReason::Scam => "scam",
            BlockReason::Other => "other",
        }
    }
}

/// One directed block relation. At most one active block exists per ordered
/// (blocker, blocked) pair; storage enforces the uniqueness. Removed
/// permanently on unblock, never soft-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBlock {
    pub id: Uuid,
    pub blocker_user_id: Uuid,
    pub blocked_user_id: Uuid,
    pub reason: BlockReason,
    /// Free-text context; required when the reason is `Other`.
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserBlock {
    pub fn new(
        id: Uuid,
        blocker_user_id: Uuid,
        blocked_user_id: Uuid,
        reason: BlockReason,
        details: Option<String>,
    ) -> Result<Self> {
        if blocker_user_id == blocked_user_id {
            return Err(DomainError::Validation(
                "Users cannot block themselves".to_string(),
            ));
        }
        if reason == BlockReason::Other
            && details.as_deref().map_or(true, |d| d.trim().is_empty())
        {
            return Err(DomainError::Validation(
                "Blocking for 'other' requires a description".to_string(),
            ));
        }
        Ok(Self {
            id,
            blocker_user_id,
            blocked_user_id,
            reason,
            details,
            created_at: Utc::now(),
        })
    }

    pub fn age_in_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }

    pub fn is_recent(&self, now: DateTime<Utc>, window_days: i64) -> bool {
        self.age_in_days(now) <= window_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_rejects_self_block() {
        let user = Uuid::new_v4();
        let result = UserBlock::new(Uuid::new_v4(), user, user, BlockReason::Spam, None);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_other_requires_details() {
        let (blocker, blocked) = (Uuid::new_v4(), Uuid::new_v4());

        for details in [None, Some("   ".to_string())] {
            let result =
                UserBlock::new(Uuid::new_v4(), blocker, blocked, BlockReason::Other, details);
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        let block = UserBlock::new(
            Uuid::new_v4(),
            blocker,
            blocked,
            BlockReason::Other,
            Some("impersonating a brand account".to_string()),
        );
        assert!(block.is_ok());
    }

    #[test]
    fn test_recency_window() {
        let block = UserBlock::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            BlockReason::Harassment,
            Some("repeated unwanted messages".to_string()),
        )
        .unwrap();

        let now = Utc::now();
        assert!(block.is_recent(now, 7));
        assert!(!block.is_recent(now + Duration::days(8), 7));
    }
}
