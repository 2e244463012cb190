use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Spam,
    Inappropriate,
    Harassment,
    Scam,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Keywords in a report description that force critical priority regardless
/// of the selected reason.
const SEVERE_KEYWORDS: &[&str] = &[
    "threat", "violence", "harm", "suicide", "illegal", "underage", "minor",
];

impl ReportPriority {
    /// Severe keywords override the reason-based priority.
    pub fn compute(reason: ReportReason, description: &str) -> Self {
        let lowered = description.to_lowercase();
        if SEVERE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            return ReportPriority::Critical;
        }
        match reason {
            ReportReason::Harassment | ReportReason::Inappropriate => ReportPriority::High,
            ReportReason::Scam => ReportPriority::Medium,
            ReportReason::Spam | ReportReason::Other => ReportPriority::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Submitted,
    UnderReview,
    Resolved,
    Dismissed,
}

/// A user report against a specific message. At most one report exists per
/// (reporter, message) pair; storage enforces the uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReport {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub message_id: Uuid,
    pub reason: ReportReason,
    pub description: String,
    pub evidence_urls: Vec<String>,
    pub priority: ReportPriority,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl MessageReport {
    pub fn new(
        id: Uuid,
        reporter_id: Uuid,
        message_id: Uuid,
        reason: ReportReason,
        description: String,
        evidence_urls: Vec<String>,
    ) -> Self {
        let priority = ReportPriority::compute(reason, &description);
        Self {
            id,
            reporter_id,
            message_id,
            reason,
            description,
            evidence_urls,
            priority,
            status: ReportStatus::Submitted,
            created_at: Utc::now(),
        }
    }
}
