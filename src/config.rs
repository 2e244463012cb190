use std::env;
use std::str::FromStr;

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Thresholds for turning an adjusted severity score into a moderation action.
/// Operators tune these without redeploying; the code carries the defaults.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// Score at or above which content is rejected outright.
    pub auto_reject_score: u8,
    /// Resolved violations at or above which content is rejected regardless of score.
    pub auto_reject_violations: u32,
    pub shadow_ban_score: u8,
    /// Recent flags required (together with the score) to shadow-ban.
    pub shadow_ban_recent_flags: u32,
    pub rate_limit_score: u8,
    pub rate_limit_total_flags: u32,
    pub review_score: u8,
    /// Lower review threshold applied to users with any prior flags.
    pub review_score_with_history: u8,
    /// Cap on the history-based risk multiplier.
    pub max_risk_multiplier: f32,
    /// Chunk size for bulk queue resolution.
    pub resolve_batch_size: usize,
    /// Pause between chunks so bulk resolution does not hammer storage.
    pub resolve_batch_pause_ms: u64,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            auto_reject_score: 80,
            auto_reject_violations: 5,
            shadow_ban_score: 60,
            shadow_ban_recent_flags: 3,
            rate_limit_score: 40,
            rate_limit_total_flags: 3,
            review_score: 30,
            review_score_with_history: 20,
            max_risk_multiplier: 3.0,
            resolve_batch_size: 10,
            resolve_batch_pause_ms: 100,
        }
    }
}

impl ModerationConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auto_reject_score: env_parse("MOD_AUTO_REJECT_SCORE", defaults.auto_reject_score),
            auto_reject_violations: env_parse(
                "MOD_AUTO_REJECT_VIOLATIONS",
                defaults.auto_reject_violations,
            ),
            shadow_ban_score: env_parse("MOD_SHADOW_BAN_SCORE", defaults.shadow_ban_score),
            shadow_ban_recent_flags: env_parse(
                "MOD_SHADOW_BAN_RECENT_FLAGS",
                defaults.shadow_ban_recent_flags,
            ),
            rate_limit_score: env_parse("MOD_RATE_LIMIT_SCORE", defaults.rate_limit_score),
            rate_limit_total_flags: env_parse(
                "MOD_RATE_LIMIT_TOTAL_FLAGS",
                defaults.rate_limit_total_flags,
            ),
            review_score: env_parse("MOD_REVIEW_SCORE", defaults.review_score),
            review_score_with_history: env_parse(
                "MOD_REVIEW_SCORE_WITH_HISTORY",
                defaults.review_score_with_history,
            ),
            max_risk_multiplier: env_parse("MOD_MAX_RISK_MULTIPLIER", defaults.max_risk_multiplier),
            resolve_batch_size: env_parse("MOD_RESOLVE_BATCH_SIZE", defaults.resolve_batch_size),
            resolve_batch_pause_ms: env_parse(
                "MOD_RESOLVE_BATCH_PAUSE_MS",
                defaults.resolve_batch_pause_ms,
            ),
        }
    }
}

/// Anti-abuse caps on the blocking action itself, independent of message
/// moderation. Prevents weaponized mass-blocking.
#[derive(Debug, Clone)]
pub struct BlockLimitsConfig {
    pub max_blocks_per_day: u32,
    pub max_blocks_per_month: u32,
    pub max_total_blocks: u32,
    /// Window used to mark a block as "recent" in block-list views.
    pub recent_window_days: i64,
}

impl Default for BlockLimitsConfig {
    fn default() -> Self {
        Self {
            max_blocks_per_day: 10,
            max_blocks_per_month: 50,
            max_total_blocks: 100,
            recent_window_days: 7,
        }
    }
}

impl BlockLimitsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_blocks_per_day: env_parse("BLOCK_MAX_PER_DAY", defaults.max_blocks_per_day),
            max_blocks_per_month: env_parse("BLOCK_MAX_PER_MONTH", defaults.max_blocks_per_month),
            max_total_blocks: env_parse("BLOCK_MAX_TOTAL", defaults.max_total_blocks),
            recent_window_days: env_parse("BLOCK_RECENT_WINDOW_DAYS", defaults.recent_window_days),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessagingConfig {
    /// Upper bound on message body length, in characters.
    pub max_body_length: usize,
    /// Minimum interval between messages in one conversation. Zero disables
    /// the cooldown (used by tests).
    pub min_message_interval_ms: i64,
    /// Characters of the last message body included in conversation summaries.
    pub preview_length: usize,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            max_body_length: 5000,
            min_message_interval_ms: 1000,
            preview_length: 120,
        }
    }
}

impl MessagingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_body_length: env_parse("MSG_MAX_BODY_LENGTH", defaults.max_body_length),
            min_message_interval_ms: env_parse(
                "MSG_MIN_INTERVAL_MS",
                defaults.min_message_interval_ms,
            ),
            preview_length: env_parse("MSG_PREVIEW_LENGTH", defaults.preview_length),
        }
    }
}
