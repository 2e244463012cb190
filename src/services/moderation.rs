use crate::config::ModerationConfig;
use crate::error::Result;
use crate::models::moderation::{
    ContentType, ModerationAction, ModerationQueueItem, ModerationResult, NewQueueItem,
    QueueFilters, ReviewDecision, UserModerationStats,
};
use crate::repository::ContentModerationRepository;
use crate::services::analyzer::ModerationAnalyzer;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Request to moderate a piece of content before it is persisted.
///
/// `content_id` is the identifier the content will be persisted under; for
/// messages the id is generated before moderation runs so a queued item can
/// always be tied back to the content it refers to.
#[derive(Debug, Clone)]
pub struct ModerationRequest {
    pub content_id: String,
    pub content_type: ContentType,
    pub content: String,
    pub user_id: Uuid,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Outcome of resolving one item in a batch.
#[derive(Debug, Clone)]
pub struct BatchResolveOutcome {
    pub queue_id: Uuid,
    pub resolved: bool,
}

/// Scores content with the analyzer, adjusts for the author's moderation
/// history, and selects an action. Wraps a repository for history lookup and
/// queueing; everything else is pure.
pub struct ContentModerationService {
    repo: Arc<dyn ContentModerationRepository>,
    analyzer: Arc<dyn ModerationAnalyzer>,
    config: ModerationConfig,
}

impl ContentModerationService {
    pub fn new(
        repo: Arc<dyn ContentModerationRepository>,
        analyzer: Arc<dyn ModerationAnalyzer>,
        config: ModerationConfig,
    ) -> Self {
        Self {
            repo,
            analyzer,
            config,
        }
    }

    /// Moderate content before it is sent or posted.
    ///
    /// A failed history lookup falls back to all-zero stats: a transient
    /// outage must never raise a user's risk above baseline.
    pub async fn moderate_content(&self, request: &ModerationRequest) -> Result<ModerationResult> {
        let stats = match self.repo.get_user_stats(request.user_id).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(
                    user_id = %request.user_id,
                    error = %e,
                    "Moderation history lookup failed, using baseline stats"
                );
                UserModerationStats::zero()
            }
        };

        let analysis = self.analyzer.analyze(&request.content);
        let multiplier = self.risk_multiplier(&stats);
        let adjusted = (analysis.severity_score as f32 * multiplier).min(100.0).round() as u8;
        let action = self.select_action(adjusted, &stats);

        tracing::debug!(
            user_id = %request.user_id,
            raw_score = analysis.severity_score,
            multiplier,
            adjusted_score = adjusted,
            action = ?action,
            "Content moderated"
        );

        if action == ModerationAction::FlagForReview {
            self.repo
                .queue_for_moderation(NewQueueItem {
                    content_id: request.content_id.clone(),
                    content_type: request.content_type,
                    content_text: request.content.clone(),
                    user_id: request.user_id,
                    flagged_reasons: analysis.reasons.clone(),
                    severity_score: adjusted,
                    metadata: request.metadata.clone(),
                })
                .await?;
        }

        Ok(ModerationResult {
            should_flag: analysis.should_flag || action != ModerationAction::Allow,
            reasons: analysis.reasons,
            severity_score: adjusted,
            action,
        })
    }

    /// Queue already-persisted content for review if the analyzer flags it.
    /// No history adjustment and no action selection; returns the queue id
    /// when an item was created.
    pub async fn queue_existing_content(
        &self,
        content_id: &str,
        content_type: ContentType,
        content: &str,
        user_id: Uuid,
    ) -> Result<Option<Uuid>> {
        let analysis = self.analyzer.analyze(content);
        if !analysis.should_flag {
            return Ok(None);
        }

        let queue_id = self
            .repo
            .queue_for_moderation(NewQueueItem {
                content_id: content_id.to_string(),
                content_type,
                content_text: content.to_string(),
                user_id,
                flagged_reasons: analysis.reasons,
                severity_score: analysis.severity_score,
                metadata: HashMap::new(),
            })
            .await?;
        Ok(Some(queue_id))
    }

    /// Apply a reviewer decision. Returns false (not an error) when the queue
    /// item does not exist, so retried resolutions stay idempotent.
    pub async fn resolve_moderation(
        &self,
        queue_id: Uuid,
        reviewer_id: Uuid,
        decision: ReviewDecision,
        notes: Option<String>,
    ) -> Result<bool> {
        let resolved = self
            .repo
            .resolve_item(queue_id, reviewer_id, decision, notes)
            .await?;
        if resolved {
            tracing::info!(
                queue_id = %queue_id,
                reviewer_id = %reviewer_id,
                decision = ?decision,
                "Moderation item resolved"
            );
        }
        Ok(resolved)
    }

    /// Resolve many items in chunks with inter-chunk pacing so bulk review
    /// actions do not overwhelm storage. A failure on one item is recorded
    /// in its outcome and never rolls back earlier chunks.
    pub async fn resolve_batch(
        &self,
        queue_ids: &[Uuid],
        reviewer_id: Uuid,
        decision: ReviewDecision,
        notes: Option<String>,
    ) -> Vec<BatchResolveOutcome> {
        let mut outcomes = Vec::with_capacity(queue_ids.len());
        let chunk_size = self.config.resolve_batch_size.max(1);

        for (index, chunk) in queue_ids.chunks(chunk_size).enumerate() {
            if index > 0 && self.config.resolve_batch_pause_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.resolve_batch_pause_ms)).await;
            }
            for &queue_id in chunk {
                let resolved = match self
                    .repo
                    .resolve_item(queue_id, reviewer_id, decision, notes.clone())
                    .await
                {
                    Ok(resolved) => resolved,
                    Err(e) => {
                        tracing::warn!(queue_id = %queue_id, error = %e, "Batch resolve item failed");
                        false
                    }
                };
                outcomes.push(BatchResolveOutcome { queue_id, resolved });
            }
        }
        outcomes
    }

    pub async fn get_moderation_queue(
        &self,
        filters: &QueueFilters,
    ) -> Result<Vec<ModerationQueueItem>> {
        self.repo.get_queue(filters).await
    }

    pub async fn get_user_stats(&self, user_id: Uuid) -> Result<UserModerationStats> {
        self.repo.get_user_stats(user_id).await
    }

    /// History-based scaling factor applied to the raw severity score.
    /// The step table is deliberate policy; the cap is operator-tunable.
    fn risk_multiplier(&self, stats: &UserModerationStats) -> f32 {
        let mut multiplier: f32 = 1.0;

        if stats.flagged_last_30_days > 3 {
            multiplier += 0.5;
        }
        if stats.flagged_last_30_days > 5 {
            multiplier += 0.5;
        }
        if stats.total_flagged > 5 {
            multiplier += 0.3;
        }
        if stats.total_flagged > 10 {
            multiplier += 0.3;
        }
        if stats.resolved_violations > 2 {
            multiplier += 0.4;
        }
        if stats.resolved_violations > 5 {
            multiplier += 0.4;
        }

        multiplier.min(self.config.max_risk_multiplier)
    }

    fn select_action(&self, score: u8, stats: &UserModerationStats) -> ModerationAction {
        let config = &self.config;

        if score >= config.auto_reject_score
            || stats.resolved_violations >= config.auto_reject_violations
        {
            return ModerationAction::AutoReject;
        }
        if score >= config.shadow_ban_score
            && stats.flagged_last_30_days >= config.shadow_ban_recent_flags
        {
            return ModerationAction::ShadowBan;
        }
        if score >= config.rate_limit_score && stats.total_flagged >= config.rate_limit_total_flags
        {
            return ModerationAction::RateLimit;
        }
        if score >= config.review_score
            || (score >= config.review_score_with_history && stats.total_flagged > 0)
        {
            return ModerationAction::FlagForReview;
        }
        ModerationAction::Allow
    }
}
