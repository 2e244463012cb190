pub mod analyzer;
pub mod moderation;

pub use analyzer::{KeywordAnalyzer, ModerationAnalyzer};
pub use moderation::{BatchResolveOutcome, ContentModerationService, ModerationRequest};
