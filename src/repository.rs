//! Async ports implemented by the persistence layer. The domain core never
//! talks to storage directly; adapters own connections, timeouts and retries.
//!
//! Two invariants are enforced at the storage boundary rather than by
//! check-then-insert in the application layer: at most one [`UserBlock`] per
//! ordered (blocker, blocked) pair, and at most one [`MessageReport`] per
//! (reporter, message) pair. `save` returns [`DomainError::Conflict`] when a
//! constraint fires.

use crate::error::Result;
use crate::models::conversation::{Conversation, ConversationStatus};
use crate::models::gig::{Gig, GigApplication};
use crate::models::moderation::{
    ModerationQueueItem, NewQueueItem, QueueFilters, ReviewDecision, UserModerationStats,
};
use crate::models::profile::ProfileSummary;
use crate::models::report::MessageReport;
use crate::models::user_block::UserBlock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Filters for listing a user's conversations.
#[derive(Debug, Clone, Default)]
pub struct ConversationFilter {
    pub gig_id: Option<Uuid>,
    pub status: Option<ConversationStatus>,
    /// When true, only conversations with unread messages for the listing user.
    pub has_unread: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Upsert the aggregate. Message append is append-only; concurrent
    /// senders may race on `last_message_at` (last write wins, ordering is
    /// by `sent_at`).
    async fn save(&self, conversation: &Conversation) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>>;
    /// Find the unique conversation for a gig between two participants,
    /// regardless of participant order.
    async fn find_by_gig_and_participants(
        &self,
        gig_id: Uuid,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Option<Conversation>>;
    /// Conversations the user participates in, most recent activity first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &ConversationFilter,
    ) -> Result<Vec<Conversation>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockSortField {
    #[default]
    CreatedAt,
    Reason,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlockSort {
    pub field: BlockSortField,
    pub order: SortOrder,
}

#[async_trait]
pub trait UserBlockRepository: Send + Sync {
    /// Insert a block. Returns `Conflict` if the ordered pair already has one.
    async fn save(&self, block: &UserBlock) -> Result<()>;
    async fn find_between(&self, blocker: Uuid, blocked: Uuid) -> Result<Option<UserBlock>>;
    /// Hard delete. Returns whether a row existed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
    async fn list_for_blocker(
        &self,
        blocker: Uuid,
        sort: BlockSort,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<UserBlock>>;
    async fn count_for_blocker(&self, blocker: Uuid) -> Result<u64>;
    /// Blocks created by the user since `since`, for anti-abuse windows.
    async fn count_created_since(&self, blocker: Uuid, since: DateTime<Utc>) -> Result<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentModerationRepository: Send + Sync {
    /// Enqueue content for human review, returning the queue item id.
    async fn queue_for_moderation(&self, item: NewQueueItem) -> Result<Uuid>;
    /// Apply a reviewer decision. Returns false when the item does not exist.
    async fn resolve_item(
        &self,
        queue_id: Uuid,
        reviewer_id: Uuid,
        decision: ReviewDecision,
        notes: Option<String>,
    ) -> Result<bool>;
    /// Queue items sorted by severity descending, then recency descending.
    async fn get_queue(&self, filters: &QueueFilters) -> Result<Vec<ModerationQueueItem>>;
    /// Derived per-user history, recomputed from the queue.
    async fn get_user_stats(&self, user_id: Uuid) -> Result<UserModerationStats>;
}

#[async_trait]
pub trait MessageReportRepository: Send + Sync {
    /// Insert a report. Returns `Conflict` for a duplicate (reporter, message).
    async fn save(&self, report: &MessageReport) -> Result<()>;
    async fn find_by_reporter_and_message(
        &self,
        reporter_id: Uuid,
        message_id: Uuid,
    ) -> Result<Option<MessageReport>>;
}

#[async_trait]
pub trait GigRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Gig>>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_by_gig_and_applicant(
        &self,
        gig_id: Uuid,
        applicant_user_id: Uuid,
    ) -> Result<Option<GigApplication>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<ProfileSummary>>;
}

/// Identifier generation stays behind a seam so adapters can swap in
/// deterministic ids for tests or sortable ids in production.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}

/// Default v4 generator.
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
