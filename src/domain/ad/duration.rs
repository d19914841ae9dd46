use serde::{Deserialize, Serialize};

/// Average narration pace for the proportional policy
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 150;

/// 2.4 words per second
pub const FIXED_RATE_WORDS_PER_MINUTE: u32 = 144;

/// How a generated script is cut down to fit its spoken-duration budget.
///
/// `Proportional` is the authoritative policy; `FixedRate` is only used when
/// explicitly configured. Both estimate spoken time from word count alone, so
/// the result is approximate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DurationPolicy {
    /// Scale the word count by `target / estimated`
    Proportional { words_per_minute: u32 },
    /// Keep `target_seconds * words_per_minute / 60` words
    FixedRate { words_per_minute: u32 },
}

impl Default for DurationPolicy {
    fn default() -> Self {
        DurationPolicy::Proportional {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

impl DurationPolicy {
    pub fn fixed_rate() -> Self {
        DurationPolicy::FixedRate {
            words_per_minute: FIXED_RATE_WORDS_PER_MINUTE,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "proportional" => Some(Self::default()),
            "fixed_rate" | "fixed-rate" => Some(Self::fixed_rate()),
            _ => None,
        }
    }

    fn words_per_minute(&self) -> u32 {
        match self {
            Self::Proportional { words_per_minute } | Self::FixedRate { words_per_minute } => {
                (*words_per_minute).max(1)
            }
        }
    }

    /// Estimated spoken duration of `script` in seconds
    pub fn estimate_seconds(&self, script: &str) -> f64 {
        let words = script.split_whitespace().count() as f64;
        words * 60.0 / self.words_per_minute() as f64
    }

    /// Trim `script` to fit `target_seconds`.
    ///
    /// Scripts that already fit are returned untouched. Otherwise the result is
    /// a whole-word prefix joined by single spaces, which can be empty when the
    /// budget rounds down to zero words.
    pub fn enforce(&self, script: &str, target_seconds: u32) -> String {
        let words: Vec<&str> = script.split_whitespace().collect();
        let total = words.len() as u64;
        let wpm = self.words_per_minute() as u64;
        let target = target_seconds as u64;

        // estimated = total * 60 / wpm; compare without dividing
        if total * 60 <= target * wpm {
            return script.to_string();
        }

        let keep = match self {
            // floor(total * target / estimated)
            Self::Proportional { .. } => (total * target * wpm) / (total * 60),
            Self::FixedRate { .. } => (target * wpm) / 60,
        };

        words[..keep as usize].join(" ")
    }
}
