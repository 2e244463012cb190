//! Keyword-heuristic content analyzer. Deterministic and free of I/O so the
//! scoring can be unit-tested exhaustively; the trait seam lets a
//! classifier-based implementation replace it without touching the
//! moderation service or use cases.

use crate::models::moderation::{ContentAnalysis, ModerationReason};
use once_cell::sync::Lazy;
use regex::Regex;

const INAPPROPRIATE_WORDS: &[&str] = &[
    "fuck", "shit", "damn", "bitch", "asshole", "bastard", "crap",
];

const HATE_SPEECH_WORDS: &[&str] = &[
    "hate", "nazi", "racist", "sexist", "homophobic", "transphobic",
];

const EXPLICIT_WORDS: &[&str] = &["nude", "naked", "sex", "porn", "xxx", "nsfw", "adult"];

const SPAM_PHRASES: &[&str] = &[
    "buy now",
    "click here",
    "free money",
    "get rich",
    "promotion",
    "follow me",
    "like for like",
    "sub4sub",
    "follow4follow",
    "visit my profile",
    "check out my",
    "dm me",
    "message me",
    "whatsapp",
    "instagram",
    "telegram",
    "snapchat",
    "onlyfans",
];

const INAPPROPRIATE_WEIGHT: u8 = 20;
const HATE_SPEECH_WEIGHT: u8 = 40;
const EXPLICIT_WEIGHT: u8 = 30;
const SPAM_PHRASE_WEIGHT: u8 = 25;
const EXCESSIVE_CAPS_WEIGHT: u8 = 15;
const REPEATED_CHARS_WEIGHT: u8 = 15;
const EXTERNAL_LINKS_WEIGHT: u8 = 20;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(https?://|www\.|\.com\b|\.org\b|\.net\b)").expect("URL pattern is valid")
});

/// Pure text-scoring seam: content in, flagged reasons and severity out.
pub trait ModerationAnalyzer: Send + Sync {
    fn analyze(&self, content: &str) -> ContentAnalysis;
}

/// Fixed-list keyword analyzer. Tuning the lists is out of scope; swapping
/// the whole implementation is the supported extension point.
#[derive(Default)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn has_excessive_caps(content: &str) -> bool {
        let total = content.chars().count();
        if total <= 10 {
            return false;
        }
        let caps = content.chars().filter(|c| c.is_ascii_uppercase()).count();
        caps as f32 / total as f32 > 0.5
    }

    /// 5+ identical consecutive characters. The regex crate has no
    /// backreferences, so scan directly.
    fn has_repeated_chars(content: &str) -> bool {
        let mut run = 1usize;
        let mut prev: Option<char> = None;
        for c in content.chars() {
            if Some(c) == prev {
                run += 1;
                if run >= 5 {
                    return true;
                }
            } else {
                run = 1;
                prev = Some(c);
            }
        }
        false
    }
}

impl ModerationAnalyzer for KeywordAnalyzer {
    fn analyze(&self, content: &str) -> ContentAnalysis {
        if content.trim().is_empty() {
            return ContentAnalysis::clean();
        }

        let lowered = content.to_lowercase();
        let mut reasons = Vec::new();
        let mut score: u32 = 0;

        if INAPPROPRIATE_WORDS.iter().any(|w| lowered.contains(w)) {
            reasons.push(ModerationReason::InappropriateLanguage);
            score += INAPPROPRIATE_WEIGHT as u32;
        }
        if HATE_SPEECH_WORDS.iter().any(|w| lowered.contains(w)) {
            reasons.push(ModerationReason::HateSpeech);
            score += HATE_SPEECH_WEIGHT as u32;
        }
        if EXPLICIT_WORDS.iter().any(|w| lowered.contains(w)) {
            reasons.push(ModerationReason::ExplicitContent);
            score += EXPLICIT_WEIGHT as u32;
        }
        if SPAM_PHRASES.iter().any(|p| lowered.contains(p)) {
            reasons.push(ModerationReason::PotentialSpam);
            score += SPAM_PHRASE_WEIGHT as u32;
        }
        if Self::has_excessive_caps(content) {
            reasons.push(ModerationReason::ExcessiveCaps);
            score += EXCESSIVE_CAPS_WEIGHT as u32;
        }
        if Self::has_repeated_chars(content) {
            reasons.push(ModerationReason::SpamPattern);
            score += REPEATED_CHARS_WEIGHT as u32;
        }
        if URL_RE.is_match(&lowered) {
            reasons.push(ModerationReason::ExternalLinks);
            score += EXTERNAL_LINKS_WEIGHT as u32;
        }

        for reason in &reasons {
            tracing::debug!(reason = %reason, "Content analysis hit");
        }

        ContentAnalysis {
            should_flag: !reasons.is_empty(),
            reasons,
            severity_score: score.min(100) as u8,
        }
    }
}
