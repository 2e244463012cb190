#![allow(dead_code)]

use collab_messaging::config::{BlockLimitsConfig, MessagingConfig, ModerationConfig};
use collab_messaging::memory::{
    InMemoryApplicationRepository, InMemoryConversationRepository, InMemoryGigRepository,
    InMemoryMessageReportRepository, InMemoryModerationRepository, InMemoryProfileRepository,
    InMemoryUserBlockRepository, RecordingEventBus,
};
use collab_messaging::models::gig::{ApplicationStatus, Gig, GigApplication};
use collab_messaging::models::profile::ProfileSummary;
use collab_messaging::repository::UuidGenerator;
use collab_messaging::services::{ContentModerationService, KeywordAnalyzer};
use collab_messaging::usecases::{
    BlockUserUseCase, CheckUserBlockedUseCase, GetBlockedUsersUseCase, GetConversationsUseCase,
    ReportMessageUseCase, SendMessageUseCase, UnblockUserUseCase,
};
use chrono::Utc;
use std::sync::{Arc, Once};
use uuid::Uuid;

static TRACING: Once = Once::new();

/// Route test logs through the standard subscriber; opt in with RUST_LOG.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Full service graph over in-memory adapters, built the way a process
/// would wire it at startup.
pub struct TestApp {
    pub gigs: Arc<InMemoryGigRepository>,
    pub applications: Arc<InMemoryApplicationRepository>,
    pub conversations: Arc<InMemoryConversationRepository>,
    pub blocks: Arc<InMemoryUserBlockRepository>,
    pub moderation_repo: Arc<InMemoryModerationRepository>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub reports: Arc<InMemoryMessageReportRepository>,
    pub bus: Arc<RecordingEventBus>,
    pub moderation: Arc<ContentModerationService>,
    pub send_message: SendMessageUseCase,
    pub report_message: ReportMessageUseCase,
    pub block_user: BlockUserUseCase,
    pub unblock_user: UnblockUserUseCase,
    pub check_user_blocked: CheckUserBlockedUseCase,
    pub get_blocked_users: GetBlockedUsersUseCase,
    pub get_conversations: GetConversationsUseCase,
}

impl TestApp {
    pub fn new() -> Self {
        // No send cooldown in tests; everything else uses defaults.
        let messaging = MessagingConfig {
            min_message_interval_ms: 0,
            ..MessagingConfig::default()
        };
        Self::with_configs(messaging, BlockLimitsConfig::default())
    }

    pub fn with_configs(messaging: MessagingConfig, limits: BlockLimitsConfig) -> Self {
        init_tracing();

        let gigs = Arc::new(InMemoryGigRepository::new());
        let applications = Arc::new(InMemoryApplicationRepository::new());
        let conversations = Arc::new(InMemoryConversationRepository::new());
        let blocks = Arc::new(InMemoryUserBlockRepository::new());
        let moderation_repo = Arc::new(InMemoryModerationRepository::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let reports = Arc::new(InMemoryMessageReportRepository::new());
        let bus = Arc::new(RecordingEventBus::new());
        let ids = Arc::new(UuidGenerator);

        let moderation = Arc::new(ContentModerationService::new(
            moderation_repo.clone(),
            Arc::new(KeywordAnalyzer::new()),
            ModerationConfig::default(),
        ));

        let send_message = SendMessageUseCase::new(
            gigs.clone(),
            applications.clone(),
            conversations.clone(),
            blocks.clone(),
            moderation.clone(),
            bus.clone(),
            ids.clone(),
            messaging.clone(),
        );
        let report_message = ReportMessageUseCase::new(reports.clone(), ids.clone());
        let block_user = BlockUserUseCase::new(
            blocks.clone(),
            profiles.clone(),
            bus.clone(),
            ids.clone(),
            limits.clone(),
        );
        let unblock_user = UnblockUserUseCase::new(blocks.clone(), bus.clone());
        let check_user_blocked = CheckUserBlockedUseCase::new(blocks.clone());
        let get_blocked_users =
            GetBlockedUsersUseCase::new(blocks.clone(), profiles.clone(), limits);
        let get_conversations = GetConversationsUseCase::new(conversations.clone(), messaging);

        Self {
            gigs,
            applications,
            conversations,
            blocks,
            moderation_repo,
            profiles,
            reports,
            bus,
            moderation,
            send_message,
            report_message,
            block_user,
            unblock_user,
            check_user_blocked,
            get_blocked_users,
            get_conversations,
        }
    }

    pub fn add_profile(&self, display_name: &str) -> Uuid {
        let user_id = Uuid::new_v4();
        self.profiles.insert(ProfileSummary {
            user_id,
            display_name: display_name.to_string(),
            handle: display_name.to_lowercase().replace(' ', "_"),
            avatar_url: None,
        });
        user_id
    }

    pub fn add_gig(&self, owner_user_id: Uuid, title: &str) -> Uuid {
        let gig_id = Uuid::new_v4();
        self.gigs.insert(Gig {
            id: gig_id,
            owner_user_id,
            title: title.to_string(),
        });
        gig_id
    }

    pub fn add_application(&self, gig_id: Uuid, applicant: Uuid, status: ApplicationStatus) {
        self.applications.insert(GigApplication {
            id: Uuid::new_v4(),
            gig_id,
            applicant_user_id: applicant,
            status,
            applied_at: Utc::now(),
        });
    }

    /// Gig owner + accepted applicant, the usual messaging pair.
    pub fn gig_pair(&self) -> (Uuid, Uuid, Uuid) {
        let owner = self.add_profile("Gig Owner");
        let applicant = self.add_profile("Applicant");
        let gig_id = self.add_gig(owner, "Studio portrait session");
        self.add_application(gig_id, applicant, ApplicationStatus::Accepted);
        (gig_id, owner, applicant)
    }
}
