use crate::error::{DomainError, Result};
use crate::models::report::{MessageReport, ReportPriority, ReportReason, ReportStatus};
use crate::repository::{IdGenerator, MessageReportRepository};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Validate)]
pub struct ReportMessageCommand {
    pub reporter_id: Uuid,
    pub message_id: Uuid,
    pub reason: ReportReason,
    #[validate(length(min = 10, max = 1000, message = "description must be 10-1000 characters"))]
    pub description: String,
    pub evidence_urls: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReportMessageResult {
    pub report_id: Uuid,
    pub status: ReportStatus,
    pub priority: ReportPriority,
}

/// Files a report against a message. One report per (reporter, message);
/// severe keywords in the description escalate the priority to critical.
pub struct ReportMessageUseCase {
    reports: Arc<dyn MessageReportRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl ReportMessageUseCase {
    pub fn new(reports: Arc<dyn MessageReportRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { reports, ids }
    }

    pub async fn execute(&self, command: ReportMessageCommand) -> Result<ReportMessageResult> {
        command
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        if self
            .reports
            .find_by_reporter_and_message(command.reporter_id, command.message_id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "You have already reported this message".to_string(),
            ));
        }

        let report = MessageReport::new(
            self.ids.generate(),
            command.reporter_id,
            command.message_id,
            command.reason,
            command.description,
            command.evidence_urls,
        );
        // The storage uniqueness constraint backstops the duplicate check
        // under concurrent submissions.
        self.reports.save(&report).await?;

        tracing::info!(
            report_id = %report.id,
            message_id = %report.message_id,
            priority = ?report.priority,
            "Message report submitted"
        );

        Ok(ReportMessageResult {
            report_id: report.id,
            status: report.status,
            priority: report.priority,
        })
    }
}
