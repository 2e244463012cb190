//! Messaging and trust & safety core for the gig collaboration marketplace.
//!
//! Owns the conversation aggregate (gig-scoped threads between a gig owner
//! and an applicant), the user-blocking subsystem with its anti-abuse
//! limits, and the content-moderation engine that gates every outbound
//! message. Persistence, event transport and identifier generation sit
//! behind ports in [`repository`] and [`events`]; adapters wire them up.

pub mod config;
pub mod error;
pub mod events;
pub mod memory;
pub mod models;
pub mod repository;
pub mod services;
pub mod usecases;

pub use config::{BlockLimitsConfig, MessagingConfig, ModerationConfig};
pub use error::{DomainError, Result};
pub use events::{DomainEvent, EventBus};
pub use models::{
    Attachment, BlockReason, ContentType, Conversation, ConversationStatus, Message,
    MessageReport, ModerationAction, ModerationQueueItem, ModerationReason, ModerationResult,
    ReportPriority, ReportReason, UserBlock, UserModerationStats,
};
pub use services::{ContentModerationService, KeywordAnalyzer, ModerationAnalyzer};
