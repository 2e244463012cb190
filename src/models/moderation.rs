use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Reason a piece of content was flagged by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationReason {
    InappropriateLanguage,
    HateSpeech,
    ExplicitContent,
    PotentialSpam,
    ExcessiveCaps,
    SpamPattern,
    ExternalLinks,
    Harassment,
}

impl ModerationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationReason::InappropriateLanguage => "inappropriate_language",
            ModerationReason::HateSpeech => "hate_speech",
            ModerationReason::ExplicitContent => "explicit_content",
            ModerationReason::PotentialSpam => "potential_spam",
            ModerationReason::ExcessiveCaps => "excessive_caps",
            ModerationReason::SpamPattern => "spam_pattern",
            ModerationReason::ExternalLinks => "external_links",
            ModerationReason::Harassment => "harassment",
        }
    }
}

impl std::fmt::Display for ModerationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action selected for a piece of content after history adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Allow,
    FlagForReview,
    AutoReject,
    ShadowBan,
    RateLimit,
}

/// Content categories the moderation pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Message,
    Gig,
    Profile,
    Showcase,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Message => "message",
            ContentType::Gig => "gig",
            ContentType::Profile => "profile",
            ContentType::Showcase => "showcase",
        }
    }
}

/// Raw analyzer output, before any user-history adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub should_flag: bool,
    pub reasons: Vec<ModerationReason>,
    pub severity_score: u8,
}

impl ContentAnalysis {
    pub fn clean() -> Self {
        Self {
            should_flag: false,
            reasons: Vec::new(),
            severity_score: 0,
        }
    }
}

/// Final moderation verdict returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationResult {
    pub should_flag: bool,
    pub reasons: Vec<ModerationReason>,
    /// History-adjusted severity, 0-100.
    pub severity_score: u8,
    pub action: ModerationAction,
}

/// Review lifecycle of a queued item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
    Escalated,
}

/// Decision a reviewer can take on a queue item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved,
    Rejected,
    Escalated,
}

impl ReviewDecision {
    pub fn into_status(self) -> QueueStatus {
        match self {
            ReviewDecision::Approved => QueueStatus::Approved,
            ReviewDecision::Rejected => QueueStatus::Rejected,
            ReviewDecision::Escalated => QueueStatus::Escalated,
        }
    }
}

/// Item awaiting (or resolved by) human review. Never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationQueueItem {
    pub id: Uuid,
    pub content_id: String,
    pub content_type: ContentType,
    pub content_text: String,
    pub user_id: Uuid,
    pub flagged_reasons: Vec<ModerationReason>,
    pub severity_score: u8,
    pub status: QueueStatus,
    pub reviewer_id: Option<Uuid>,
    pub auto_flagged_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub resolution_notes: Option<String>,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Input for enqueueing content for review.
#[derive(Debug, Clone)]
pub struct NewQueueItem {
    pub content_id: String,
    pub content_type: ContentType,
    pub content_text: String,
    pub user_id: Uuid,
    pub flagged_reasons: Vec<ModerationReason>,
    pub severity_score: u8,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Filters for reading the moderation queue. Results are sorted by severity
/// descending, then recency descending.
#[derive(Debug, Clone, Default)]
pub struct QueueFilters {
    pub status: Option<QueueStatus>,
    pub severity_min: Option<u8>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Per-user moderation history, recomputed on demand from the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserModerationStats {
    pub total_flagged: u32,
    pub flagged_last_30_days: u32,
    pub resolved_violations: u32,
    pub current_risk_score: f32,
}

impl UserModerationStats {
    /// Conservative baseline used when the history lookup fails: a transient
    /// outage must never raise a user's risk above baseline.
    pub fn zero() -> Self {
        Self {
            total_flagged: 0,
            flagged_last_30_days: 0,
            resolved_violations: 0,
            current_risk_score: 0.0,
        }
    }
}
