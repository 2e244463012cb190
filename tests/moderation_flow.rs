mod common;

use collab_messaging::error::DomainError;
use collab_messaging::models::moderation::{ContentType, QueueFilters, QueueStatus, ReviewDecision};
use collab_messaging::models::report::{ReportPriority, ReportReason, ReportStatus};
use collab_messaging::usecases::{ReportMessageCommand, SendMessageCommand};
use common::TestApp;
use uuid::Uuid;

fn report(reporter: Uuid, message: Uuid, reason: ReportReason, description: &str) -> ReportMessageCommand {
    ReportMessageCommand {
        reporter_id: reporter,
        message_id: message,
        reason,
        description: description.to_string(),
        evidence_urls: Vec::new(),
    }
}

#[tokio::test]
async fn severe_keyword_in_report_forces_critical_priority() {
    let app = TestApp::new();
    let reporter = app.add_profile("Reporter");

    let result = app
        .report_message
        .execute(report(
            reporter,
            Uuid::new_v4(),
            ReportReason::Spam,
            "They threatened to harm me if I decline",
        ))
        .await
        .unwrap();

    assert_eq!(result.priority, ReportPriority::Critical);
    assert_eq!(result.status, ReportStatus::Submitted);
}

#[tokio::test]
async fn report_priority_follows_the_reason() {
    let app = TestApp::new();
    let reporter = app.add_profile("Reporter");

    let result = app
        .report_message
        .execute(report(
            reporter,
            Uuid::new_v4(),
            ReportReason::Spam,
            "copy pasted advertising in every thread",
        ))
        .await
        .unwrap();
    assert_eq!(result.priority, ReportPriority::Low);
}

#[tokio::test]
async fn a_message_can_only_be_reported_once_per_user() {
    let app = TestApp::new();
    let reporter = app.add_profile("Reporter");
    let message_id = Uuid::new_v4();

    app.report_message
        .execute(report(
            reporter,
            message_id,
            ReportReason::Harassment,
            "keeps sending unwanted messages",
        ))
        .await
        .unwrap();

    let second = app
        .report_message
        .execute(report(
            reporter,
            message_id,
            ReportReason::Harassment,
            "keeps sending unwanted messages",
        ))
        .await;
    assert!(matches!(second, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn short_report_description_is_rejected() {
    let app = TestApp::new();
    let reporter = app.add_profile("Reporter");

    let result = app
        .report_message
        .execute(report(reporter, Uuid::new_v4(), ReportReason::Other, "bad"))
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn queue_lists_highest_severity_first() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    app.moderation
        .queue_existing_content("low", ContentType::Message, "well fuck", user)
        .await
        .unwrap();
    app.moderation
        .queue_existing_content("high", ContentType::Message, "nothing but hate here", user)
        .await
        .unwrap();

    let queue = app
        .moderation
        .get_moderation_queue(&QueueFilters::default())
        .await
        .unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].content_id, "high");
    assert_eq!(queue[0].severity_score, 40);
    assert_eq!(queue[1].content_id, "low");
    assert_eq!(queue[1].severity_score, 20);
}

#[tokio::test]
async fn resolving_an_item_moves_it_out_of_pending_and_into_stats() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let reviewer = Uuid::new_v4();

    let queue_id = app
        .moderation
        .queue_existing_content("m-1", ContentType::Message, "nothing but hate here", user)
        .await
        .unwrap()
        .expect("flagged content is queued");

    let resolved = app
        .moderation
        .resolve_moderation(
            queue_id,
            reviewer,
            ReviewDecision::Rejected,
            Some("slur directed at another user".to_string()),
        )
        .await
        .unwrap();
    assert!(resolved);

    let pending = app
        .moderation
        .get_moderation_queue(&QueueFilters {
            status: Some(QueueStatus::Pending),
            ..QueueFilters::default()
        })
        .await
        .unwrap();
    assert!(pending.is_empty());

    let stats = app.moderation.get_user_stats(user).await.unwrap();
    assert_eq!(stats.total_flagged, 1);
    assert_eq!(stats.flagged_last_30_days, 1);
    assert_eq!(stats.resolved_violations, 1);
}

#[tokio::test]
async fn resolving_an_unknown_item_is_not_an_error() {
    let app = TestApp::new();

    let resolved = app
        .moderation
        .resolve_moderation(
            Uuid::new_v4(),
            Uuid::new_v4(),
            ReviewDecision::Approved,
            None,
        )
        .await
        .unwrap();
    assert!(!resolved);
}

#[tokio::test]
async fn batch_resolve_reports_per_item_outcomes() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let reviewer = Uuid::new_v4();

    let mut queue_ids = Vec::new();
    for content_id in ["a", "b", "c"] {
        let id = app
            .moderation
            .queue_existing_content(content_id, ContentType::Message, "dm me on telegram", user)
            .await
            .unwrap()
            .expect("flagged content is queued");
        queue_ids.push(id);
    }
    queue_ids.push(Uuid::new_v4()); // never queued

    let outcomes = app
        .moderation
        .resolve_batch(&queue_ids, reviewer, ReviewDecision::Approved, None)
        .await;

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[..3].iter().all(|o| o.resolved));
    assert!(!outcomes[3].resolved);

    let pending = app
        .moderation
        .get_moderation_queue(&QueueFilters {
            status: Some(QueueStatus::Pending),
            ..QueueFilters::default()
        })
        .await
        .unwrap();
    assert!(pending.is_empty());
}

#[tokio::test]
async fn repeat_offender_is_rejected_even_for_clean_content() {
    let app = TestApp::new();
    let (gig_id, owner, applicant) = app.gig_pair();
    let reviewer = Uuid::new_v4();

    // Five upheld violations put the sender past the auto-reject line.
    for i in 0..5 {
        let queue_id = app
            .moderation
            .queue_existing_content(
                &format!("old-{i}"),
                ContentType::Message,
                "dm me on telegram",
                owner,
            )
            .await
            .unwrap()
            .expect("flagged content is queued");
        app.moderation
            .resolve_moderation(queue_id, reviewer, ReviewDecision::Rejected, None)
            .await
            .unwrap();
    }

    let result = app
        .send_message
        .execute(SendMessageCommand {
            gig_id,
            from_user_id: owner,
            to_user_id: applicant,
            body: "hello, are you still interested?".to_string(),
            attachments: Vec::new(),
        })
        .await;

    assert!(matches!(result, Err(DomainError::ContentRejected { .. })));
    assert_eq!(app.bus.count_of("message_sent"), 0);
}
