pub mod conversation;
pub mod gig;
pub mod message;
pub mod moderation;
pub mod profile;
pub mod report;
pub mod user_block;

pub use conversation::{Conversation, ConversationStatus};
pub use gig::{ApplicationStatus, Gig, GigApplication};
pub use message::{Attachment, Message};
pub use moderation::{
    ContentAnalysis, ContentType, ModerationAction, ModerationQueueItem, ModerationReason,
    ModerationResult, NewQueueItem, QueueFilters, QueueStatus, ReviewDecision, UserModerationStats,
};
pub use profile::ProfileSummary;
pub use report::{MessageReport, ReportPriority, ReportReason, ReportStatus};
pub use user_block::{BlockReason, UserBlock};
