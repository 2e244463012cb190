//! In-memory reference adapters for the repository and event-bus ports.
//!
//! Production persistence lives outside this crate; these adapters exist so
//! the full use-case graph can run in tests and local tooling without a
//! database. They honor the same contracts the ports document, including
//! the two uniqueness constraints.

use crate::error::{DomainError, Result};
use crate::events::{DomainEvent, EventBus};
use crate::models::conversation::Conversation;
use crate::models::gig::{Gig, GigApplication};
use crate::models::moderation::{
    ModerationQueueItem, NewQueueItem, QueueFilters, QueueStatus, ReviewDecision,
    UserModerationStats,
};
use crate::models::profile::ProfileSummary;
use crate::models::report::MessageReport;
use crate::models::user_block::UserBlock;
use crate::repository::{
    ApplicationRepository, BlockSort, BlockSortField, ContentModerationRepository,
    ConversationFilter, ConversationRepository, GigRepository, MessageReportRepository,
    ProfileRepository, SortOrder, UserBlockRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryConversationRepository {
    conversations: DashMap<Uuid, Conversation>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn save(&self, conversation: &Conversation) -> Result<()> {
        self.conversations
            .insert(conversation.id, conversation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>> {
        Ok(self.conversations.get(&id).map(|c| c.clone()))
    }

    async fn find_by_gig_and_participants(
        &self,
        gig_id: Uuid,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Option<Conversation>> {
        Ok(self
            .conversations
            .iter()
            .find(|c| {
                c.gig_id == gig_id && c.has_participant(user_a) && c.has_participant(user_b)
            })
            .map(|c| c.clone()))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &ConversationFilter,
    ) -> Result<Vec<Conversation>> {
        let mut matches: Vec<Conversation> = self
            .conversations
            .iter()
            .filter(|c| c.has_participant(user_id))
            .filter(|c| filter.gig_id.map_or(true, |gig| c.gig_id == gig))
            .filter(|c| filter.status.map_or(true, |status| c.status == status))
            .filter(|c| {
                filter
                    .has_unread
                    .map_or(true, |wanted| (c.unread_count(user_id) > 0) == wanted)
            })
            .map(|c| c.clone())
            .collect();

        matches.sort_by_key(|c| {
            std::cmp::Reverse(c.last_message_at.unwrap_or(c.started_at))
        });

        let offset = filter.offset.unwrap_or(0);
        let limit = filter.limit.unwrap_or(usize::MAX);
        Ok(matches.into_iter().skip(offset).take(limit).collect())
    }
}

#[derive(Default)]
pub struct InMemoryUserBlockRepository {
    blocks: DashMap<(Uuid, Uuid), UserBlock>,
}

impl InMemoryUserBlockRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserBlockRepository for InMemoryUserBlockRepository {
    async fn save(&self, block: &UserBlock) -> Result<()> {
        let key = (block.blocker_user_id, block.blocked_user_id);
        match self.blocks.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(DomainError::Conflict(
                "A block already exists for this pair".to_string(),
            )),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(block.clone());
                Ok(())
            }
        }
    }

    async fn find_between(&self, blocker: Uuid, blocked: Uuid) -> Result<Option<UserBlock>> {
        Ok(self.blocks.get(&(blocker, blocked)).map(|b| b.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let key = self
            .blocks
            .iter()
            .find(|b| b.id == id)
            .map(|b| (b.blocker_user_id, b.blocked_user_id));
        match key {
            Some(key) => Ok(self.blocks.remove(&key).is_some()),
            None => Ok(false),
        }
    }

    async fn list_for_blocker(
        &self,
        blocker: Uuid,
        sort: BlockSort,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<UserBlock>> {
        let mut rows: Vec<UserBlock> = self
            .blocks
            .iter()
            .filter(|b| b.blocker_user_id == blocker)
            .map(|b| b.clone())
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match sort.field {
                BlockSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                BlockSortField::Reason => a.reason.as_str().cmp(b.reason.as_str()),
            };
            match sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_for_blocker(&self, blocker: Uuid) -> Result<u64> {
        Ok(self
            .blocks
            .iter()
            .filter(|b| b.blocker_user_id == blocker)
            .count() as u64)
    }

    async fn count_created_since(&self, blocker: Uuid, since: DateTime<Utc>) -> Result<u64> {
        Ok(self
            .blocks
            .iter()
            .filter(|b| b.blocker_user_id == blocker && b.created_at >= since)
            .count() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryModerationRepository {
    queue: DashMap<Uuid, ModerationQueueItem>,
}

impl InMemoryModerationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentModerationRepository for InMemoryModerationRepository {
    async fn queue_for_moderation(&self, item: NewQueueItem) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.queue.insert(
            id,
            ModerationQueueItem {
                id,
                content_id: item.content_id,
                content_type: item.content_type,
                content_text: item.content_text,
                user_id: item.user_id,
                flagged_reasons: item.flagged_reasons,
                severity_score: item.severity_score,
                status: QueueStatus::Pending,
                reviewer_id: None,
                auto_flagged_at: Utc::now(),
                reviewed_at: None,
                resolution_notes: None,
                metadata: item.metadata,
            },
        );
        Ok(id)
    }

    async fn resolve_item(
        &self,
        queue_id: Uuid,
        reviewer_id: Uuid,
        decision: ReviewDecision,
        notes: Option<String>,
    ) -> Result<bool> {
        match self.queue.get_mut(&queue_id) {
            Some(mut item) => {
                item.status = decision.into_status();
                item.reviewer_id = Some(reviewer_id);
                item.reviewed_at = Some(Utc::now());
                item.resolution_notes = notes;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_queue(&self, filters: &QueueFilters) -> Result<Vec<ModerationQueueItem>> {
        let mut items: Vec<ModerationQueueItem> = self
            .queue
            .iter()
            .filter(|item| filters.status.map_or(true, |s| item.status == s))
            .filter(|item| {
                filters
                    .severity_min
                    .map_or(true, |min| item.severity_score >= min)
            })
            .map(|item| item.clone())
            .collect();

        items.sort_by(|a, b| {
            b.severity_score
                .cmp(&a.severity_score)
                .then(b.auto_flagged_at.cmp(&a.auto_flagged_at))
        });

        let offset = filters.offset.unwrap_or(0);
        let limit = filters.limit.unwrap_or(usize::MAX);
        Ok(items.into_iter().skip(offset).take(limit).collect())
    }

    async fn get_user_stats(&self, user_id: Uuid) -> Result<UserModerationStats> {
        let cutoff = Utc::now() - Duration::days(30);
        let mut total = 0u32;
        let mut recent = 0u32;
        let mut resolved = 0u32;

        for item in self.queue.iter().filter(|i| i.user_id == user_id) {
            total += 1;
            if item.auto_flagged_at >= cutoff {
                recent += 1;
            }
            if item.status == QueueStatus::Rejected {
                resolved += 1;
            }
        }

        Ok(UserModerationStats {
            total_flagged: total,
            flagged_last_30_days: recent,
            resolved_violations: resolved,
            current_risk_score: ((total * 10 + resolved * 20) as f32).min(100.0),
        })
    }
}

#[derive(Default)]
pub struct InMemoryMessageReportRepository {
    reports: DashMap<(Uuid, Uuid), MessageReport>,
}

impl InMemoryMessageReportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageReportRepository for InMemoryMessageReportRepository {
    async fn save(&self, report: &MessageReport) -> Result<()> {
        let key = (report.reporter_id, report.message_id);
        match self.reports.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(DomainError::Conflict(
                "A report already exists for this message".to_string(),
            )),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(report.clone());
                Ok(())
            }
        }
    }

    async fn find_by_reporter_and_message(
        &self,
        reporter_id: Uuid,
        message_id: Uuid,
    ) -> Result<Option<MessageReport>> {
        Ok(self
            .reports
            .get(&(reporter_id, message_id))
            .map(|r| r.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryGigRepository {
    gigs: DashMap<Uuid, Gig>,
}

impl InMemoryGigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, gig: Gig) {
        self.gigs.insert(gig.id, gig);
    }
}

#[async_trait]
impl GigRepository for InMemoryGigRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Gig>> {
        Ok(self.gigs.get(&id).map(|g| g.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: DashMap<(Uuid, Uuid), GigApplication>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, application: GigApplication) {
        self.applications.insert(
            (application.gig_id, application.applicant_user_id),
            application,
        );
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn find_by_gig_and_applicant(
        &self,
        gig_id: Uuid,
        applicant_user_id: Uuid,
    ) -> Result<Option<GigApplication>> {
        Ok(self
            .applications
            .get(&(gig_id, applicant_user_id))
            .map(|a| a.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: DashMap<Uuid, ProfileSummary>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, profile: ProfileSummary) {
        self.profiles.insert(profile.user_id, profile);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<ProfileSummary>> {
        Ok(self.profiles.get(&user_id).map(|p| p.clone()))
    }
}

/// Event bus that records every published event, for assertions in tests.
#[derive(Default)]
pub struct RecordingEventBus {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().expect("event lock poisoned").clone()
    }

    pub fn count_of(&self, name: &str) -> usize {
        self.events().iter().filter(|e| e.name() == name).count()
    }
}

#[async_trait]
impl EventBus for RecordingEventBus {
    async fn publish(&self, event: DomainEvent) -> Result<()> {
        self.events.lock().expect("event lock poisoned").push(event);
        Ok(())
    }
}
