mod common;

use collab_messaging::config::{BlockLimitsConfig, MessagingConfig};
use collab_messaging::error::DomainError;
use collab_messaging::models::gig::ApplicationStatus;
use collab_messaging::models::user_block::BlockReason;
use collab_messaging::repository::ConversationRepository;
use collab_messaging::usecases::{
    BlockUserCommand, GetConversationsQuery, SendMessageCommand,
};
use common::TestApp;
use uuid::Uuid;

fn command(gig_id: Uuid, from: Uuid, to: Uuid, body: &str) -> SendMessageCommand {
    SendMessageCommand {
        gig_id,
        from_user_id: from,
        to_user_id: to,
        body: body.to_string(),
        attachments: Vec::new(),
    }
}

#[tokio::test]
async fn owner_messages_applicant_and_conversation_is_created_lazily() {
    let app = TestApp::new();
    let (gig_id, owner, applicant) = app.gig_pair();

    let result = app
        .send_message
        .execute(command(gig_id, owner, applicant, "Hi, love your portfolio"))
        .await
        .unwrap();

    let conversation = app
        .conversations
        .find_by_id(result.conversation_id)
        .await
        .unwrap()
        .expect("conversation persisted");
    assert_eq!(conversation.messages.len(), 1);
    assert_eq!(conversation.messages[0].id, result.message_id);
    assert_eq!(conversation.messages[0].to_user_id, applicant);
    assert_eq!(conversation.last_message_at, Some(result.sent_at));

    assert_eq!(app.bus.count_of("conversation_started"), 1);
    assert_eq!(app.bus.count_of("message_sent"), 1);
}

#[tokio::test]
async fn second_message_reuses_the_conversation() {
    let app = TestApp::new();
    let (gig_id, owner, applicant) = app.gig_pair();

    let first = app
        .send_message
        .execute(command(gig_id, owner, applicant, "hello"))
        .await
        .unwrap();
    let second = app
        .send_message
        .execute(command(gig_id, applicant, owner, "hi back"))
        .await
        .unwrap();

    assert_eq!(first.conversation_id, second.conversation_id);
    assert_eq!(app.bus.count_of("conversation_started"), 1);
    assert_eq!(app.bus.count_of("message_sent"), 2);
}

#[tokio::test]
async fn declined_applicant_cannot_be_messaged() {
    let app = TestApp::new();
    let owner = app.add_profile("Owner");
    let declined = app.add_profile("Declined");
    let gig_id = app.add_gig(owner, "Editorial shoot");
    app.add_application(gig_id, declined, ApplicationStatus::Declined);

    let result = app
        .send_message
        .execute(command(gig_id, owner, declined, "hello?"))
        .await;

    assert!(matches!(result, Err(DomainError::Unauthorized(_))));
    // No conversation or message came into existence.
    let list = app
        .get_conversations
        .list(GetConversationsQuery {
            user_id: owner,
            gig_id: None,
            status: None,
            has_unread: None,
            limit: 10,
            offset: 0,
        })
        .await
        .unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn applicant_can_only_message_the_gig_owner() {
    let app = TestApp::new();
    let (gig_id, _owner, applicant) = app.gig_pair();
    let other = app.add_profile("Other Applicant");
    app.add_application(gig_id, other, ApplicationStatus::Accepted);

    let result = app
        .send_message
        .execute(command(gig_id, applicant, other, "let's talk"))
        .await;
    assert!(matches!(result, Err(DomainError::Unauthorized(_))));
}

#[tokio::test]
async fn stranger_is_unauthorized() {
    let app = TestApp::new();
    let (gig_id, owner, _applicant) = app.gig_pair();
    let stranger = app.add_profile("Stranger");

    let result = app
        .send_message
        .execute(command(gig_id, stranger, owner, "hello there"))
        .await;
    assert!(matches!(result, Err(DomainError::Unauthorized(_))));
}

#[tokio::test]
async fn missing_gig_is_fatal() {
    let app = TestApp::new();
    let a = app.add_profile("A");
    let b = app.add_profile("B");

    let result = app
        .send_message
        .execute(command(Uuid::new_v4(), a, b, "anyone home?"))
        .await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn spam_content_is_flagged_and_never_persisted() {
    let app = TestApp::new();
    let (gig_id, owner, applicant) = app.gig_pair();

    let result = app
        .send_message
        .execute(command(
            gig_id,
            owner,
            applicant,
            "URGENT!!! CLICK HERE WWW.SPAM.COM",
        ))
        .await;

    assert!(matches!(result, Err(DomainError::ContentFlagged)));
    assert_eq!(app.bus.count_of("message_sent"), 0);

    // The flagged content still landed in the review queue, tied to the
    // pre-generated message id.
    let queue = app
        .moderation
        .get_moderation_queue(&Default::default())
        .await
        .unwrap();
    assert_eq!(queue.len(), 1);
    assert!(queue[0].severity_score >= 60);
}

#[tokio::test]
async fn severe_content_is_rejected_with_reasons() {
    let app = TestApp::new();
    let (gig_id, owner, applicant) = app.gig_pair();

    let result = app
        .send_message
        .execute(command(
            gig_id,
            owner,
            applicant,
            "fuck this racist porn, click here",
        ))
        .await;

    match result {
        Err(DomainError::ContentRejected { reasons }) => assert!(!reasons.is_empty()),
        other => panic!("expected ContentRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn blocked_users_cannot_message() {
    let app = TestApp::new();
    let (gig_id, owner, applicant) = app.gig_pair();

    app.block_user
        .execute(BlockUserCommand {
            blocker_user_id: applicant,
            blocked_user_id: owner,
            reason: BlockReason::Harassment,
            details: None,
        })
        .await
        .unwrap();

    // The block stops traffic in both directions.
    for (from, to) in [(owner, applicant), (applicant, owner)] {
        let result = app
            .send_message
            .execute(command(gig_id, from, to, "hello"))
            .await;
        assert!(matches!(result, Err(DomainError::Unauthorized(_))));
    }
}

#[tokio::test]
async fn sending_into_an_archived_conversation_fails_without_mutation() {
    let app = TestApp::new();
    let (gig_id, owner, applicant) = app.gig_pair();

    let sent = app
        .send_message
        .execute(command(gig_id, owner, applicant, "first"))
        .await
        .unwrap();

    let mut conversation = app
        .conversations
        .find_by_id(sent.conversation_id)
        .await
        .unwrap()
        .unwrap();
    conversation.archive(owner).unwrap();
    app.conversations.save(&conversation).await.unwrap();

    let result = app
        .send_message
        .execute(command(gig_id, owner, applicant, "second"))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::ConversationNotActive(_))
    ));

    let stored = app
        .conversations
        .find_by_id(sent.conversation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.messages.len(), 1);
}

#[tokio::test]
async fn cooldown_rejects_rapid_sends() {
    let messaging = MessagingConfig::default(); // 1s cooldown
    let app = TestApp::with_configs(messaging, BlockLimitsConfig::default());
    let (gig_id, owner, applicant) = app.gig_pair();

    app.send_message
        .execute(command(gig_id, owner, applicant, "first"))
        .await
        .unwrap();
    let result = app
        .send_message
        .execute(command(gig_id, owner, applicant, "too fast"))
        .await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn conversation_list_reports_unread_and_filters() {
    let app = TestApp::new();
    let (gig_id, owner, applicant) = app.gig_pair();

    app.send_message
        .execute(command(gig_id, owner, applicant, "one"))
        .await
        .unwrap();
    app.send_message
        .execute(command(gig_id, owner, applicant, "two"))
        .await
        .unwrap();

    let unread = app
        .get_conversations
        .list(GetConversationsQuery {
            user_id: applicant,
            gig_id: Some(gig_id),
            status: None,
            has_unread: Some(true),
            limit: 10,
            offset: 0,
        })
        .await
        .unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].unread_count, 2);
    assert_eq!(unread[0].other_participant_id, owner);
    assert_eq!(unread[0].last_message_preview.as_deref(), Some("two"));

    // The sender has nothing unread.
    let none = app
        .get_conversations
        .list(GetConversationsQuery {
            user_id: owner,
            gig_id: None,
            status: None,
            has_unread: Some(true),
            limit: 10,
            offset: 0,
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn only_participants_can_fetch_a_conversation() {
    let app = TestApp::new();
    let (gig_id, owner, applicant) = app.gig_pair();
    let outsider = app.add_profile("Outsider");

    let sent = app
        .send_message
        .execute(command(gig_id, owner, applicant, "hello"))
        .await
        .unwrap();

    let result = app.get_conversations.get(sent.conversation_id, outsider).await;
    assert!(matches!(result, Err(DomainError::Unauthorized(_))));

    let ok = app
        .get_conversations
        .get(sent.conversation_id, applicant)
        .await
        .unwrap();
    assert_eq!(ok.id, sent.conversation_id);
}
