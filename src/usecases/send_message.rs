use crate::config::MessagingConfig;
use crate::error::{DomainError, Result};
use crate::events::EventBus;
use crate::models::gig::Gig;
use crate::models::message::Attachment;
use crate::models::moderation::{ContentType, ModerationAction};
use crate::models::Conversation;
use crate::repository::{
    ApplicationRepository, ConversationRepository, GigRepository, IdGenerator, UserBlockRepository,
};
use crate::services::{ContentModerationService, ModerationRequest};
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Validate)]
pub struct SendMessageCommand {
    pub gig_id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    #[validate(length(min = 1, max = 5000, message = "body must be 1-5000 characters"))]
    pub body: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub conversation_id: Uuid,
    pub message_id: Uuid,
    pub sent_at: chrono::DateTime<Utc>,
}

/// Sends a message between a gig owner and an applicant, gating on
/// authorization, user blocks, and content moderation before the
/// conversation aggregate is touched.
pub struct SendMessageUseCase {
    gigs: Arc<dyn GigRepository>,
    applications: Arc<dyn ApplicationRepository>,
    conversations: Arc<dyn ConversationRepository>,
    blocks: Arc<dyn UserBlockRepository>,
    moderation: Arc<ContentModerationService>,
    events: Arc<dyn EventBus>,
    ids: Arc<dyn IdGenerator>,
    config: MessagingConfig,
}

impl SendMessageUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gigs: Arc<dyn GigRepository>,
        applications: Arc<dyn ApplicationRepository>,
        conversations: Arc<dyn ConversationRepository>,
        blocks: Arc<dyn UserBlockRepository>,
        moderation: Arc<ContentModerationService>,
        events: Arc<dyn EventBus>,
        ids: Arc<dyn IdGenerator>,
        config: MessagingConfig,
    ) -> Self {
        Self {
            gigs,
            applications,
            conversations,
            blocks,
            moderation,
            events,
            ids,
            config,
        }
    }

    pub async fn execute(&self, command: SendMessageCommand) -> Result<SendMessageResult> {
        command
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;
        if command.from_user_id == command.to_user_id {
            return Err(DomainError::Validation(
                "Cannot send a message to yourself".to_string(),
            ));
        }

        let gig = self
            .gigs
            .find_by_id(command.gig_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Gig {} not found", command.gig_id)))?;

        let (contributor_id, talent_id) = self.authorize(&gig, &command).await?;
        self.ensure_not_blocked(command.from_user_id, command.to_user_id)
            .await?;

        let mut conversation = match self
            .conversations
            .find_by_gig_and_participants(gig.id, command.from_user_id, command.to_user_id)
            .await?
        {
            Some(conversation) => conversation,
            None => Conversation::start(self.ids.generate(), gig.id, contributor_id, talent_id),
        };

        self.enforce_cooldown(&conversation)?;

        // The message id exists before moderation runs so a queued review
        // item can always be tied back to the message it refers to.
        let message_id = self.ids.generate();
        self.moderate(&command, message_id).await?;

        let sent_at = conversation
            .send_message(
                message_id,
                command.from_user_id,
                command.body.clone(),
                command.attachments.clone(),
                self.config.max_body_length,
            )?
            .sent_at;

        // Post-creation review queue is best effort: a degraded moderation
        // backend must not take down the send path.
        if let Err(e) = self
            .moderation
            .queue_existing_content(
                &message_id.to_string(),
                ContentType::Message,
                &command.body,
                command.from_user_id,
            )
            .await
        {
            tracing::warn!(
                message_id = %message_id,
                error = %e,
                "Post-send moderation queueing failed"
            );
        }

        self.conversations.save(&conversation).await?;
        for event in conversation.take_events() {
            if let Err(e) = self.events.publish(event).await {
                tracing::warn!(error = %e, "Event publish failed after send");
            }
        }

        tracing::info!(
            conversation_id = %conversation.id,
            message_id = %message_id,
            gig_id = %gig.id,
            "Message sent"
        );

        Ok(SendMessageResult {
            conversation_id: conversation.id,
            message_id,
            sent_at,
        })
    }

    /// Resolve the sender's role and the (contributor, talent) pair. The gig
    /// owner may only message applicants with a live application; an
    /// applicant may only message the gig owner.
    async fn authorize(&self, gig: &Gig, command: &SendMessageCommand) -> Result<(Uuid, Uuid)> {
        if command.from_user_id == gig.owner_user_id {
            let application = self
                .applications
                .find_by_gig_and_applicant(gig.id, command.to_user_id)
                .await?;
            match application {
                Some(app) if !app.is_declined() => Ok((gig.owner_user_id, command.to_user_id)),
                Some(_) => Err(DomainError::Unauthorized(
                    "Recipient's application to this gig was declined".to_string(),
                )),
                None => Err(DomainError::Unauthorized(
                    "Recipient has not applied to this gig".to_string(),
                )),
            }
        } else {
            if command.to_user_id != gig.owner_user_id {
                return Err(DomainError::Unauthorized(
                    "Applicants can only message the gig owner".to_string(),
                ));
            }
            let application = self
                .applications
                .find_by_gig_and_applicant(gig.id, command.from_user_id)
                .await?;
            match application {
                Some(app) if !app.is_declined() => Ok((gig.owner_user_id, command.from_user_id)),
                Some(_) => Err(DomainError::Unauthorized(
                    "Your application to this gig was declined".to_string(),
                )),
                None => Err(DomainError::Unauthorized(
                    "Only the gig owner or applicants can message on this gig".to_string(),
                )),
            }
        }
    }

    async fn ensure_not_blocked(&self, from: Uuid, to: Uuid) -> Result<()> {
        if self.blocks.find_between(from, to).await?.is_some()
            || self.blocks.find_between(to, from).await?.is_some()
        {
            return Err(DomainError::Unauthorized(
                "Messaging is blocked between these users".to_string(),
            ));
        }
        Ok(())
    }

    fn enforce_cooldown(&self, conversation: &Conversation) -> Result<()> {
        if self.config.min_message_interval_ms <= 0 {
            return Ok(());
        }
        if let Some(last) = conversation.last_message_at {
            let elapsed = Utc::now() - last;
            if elapsed < Duration::milliseconds(self.config.min_message_interval_ms) {
                return Err(DomainError::Conflict(
                    "Please wait before sending another message".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Pre-send moderation gate. Policy: content at or above the review
    /// threshold is blocked pending review, never delivered; only clearly
    /// allowed content proceeds. A moderation infrastructure failure is
    /// logged and the send proceeds, trading strictness for availability.
    async fn moderate(&self, command: &SendMessageCommand, message_id: Uuid) -> Result<()> {
        let request = ModerationRequest {
            content_id: message_id.to_string(),
            content_type: ContentType::Message,
            content: command.body.clone(),
            user_id: command.from_user_id,
            metadata: HashMap::from([(
                "gig_id".to_string(),
                serde_json::Value::String(command.gig_id.to_string()),
            )]),
        };

        match self.moderation.moderate_content(&request).await {
            Ok(result) => match result.action {
                ModerationAction::Allow => Ok(()),
                ModerationAction::FlagForReview => Err(DomainError::ContentFlagged),
                ModerationAction::AutoReject
                | ModerationAction::ShadowBan
                | ModerationAction::RateLimit => Err(DomainError::ContentRejected {
                    reasons: result.reasons,
                }),
            },
            Err(e) => {
                tracing::warn!(
                    message_id = %message_id,
                    error = %e,
                    "Moderation service unavailable, allowing send"
                );
                Ok(())
            }
        }
    }
}
