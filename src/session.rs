use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ConfigError;

/// Durations offered by the settings picker, in seconds
pub const DURATION_CHOICES: [u32; 5] = [15, 30, 60, 120, 300];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextCategory {
    Sentences,
    Paragraphs,
    Code,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Settings for one attempt. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    duration_secs: u32,
    pub category: TextCategory,
    pub difficulty: Difficulty,
}

impl SessionConfig {
    pub fn new(
        duration_secs: u32,
        category: TextCategory,
        difficulty: Difficulty,
    ) -> Result<Self, ConfigError> {
        validate_duration(duration_secs)?;
        Ok(Self {
            duration_secs,
            category,
            difficulty,
        })
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            category: TextCategory::Sentences,
            difficulty: Difficulty::Medium,
        }
    }
}

pub fn validate_duration(secs: u32) -> Result<u32, ConfigError> {
    if DURATION_CHOICES.contains(&secs) {
        Ok(secs)
    } else {
        Err(ConfigError::InvalidDuration(secs))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Active,
    Complete,
}

/// Primitive per-attempt fields. Speed, accuracy and per-character
/// classification are derived from these on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub typed: Vec<char>,
    pub matched: usize,
    pub errors: usize,
    pub started_at: Option<Instant>,
    pub last_input_at: Option<Instant>,
    pub remaining_secs: u32,
    pub status: Status,
}

impl SessionState {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            typed: Vec::new(),
            matched: 0,
            errors: 0,
            started_at: None,
            last_input_at: None,
            remaining_secs: duration_secs,
            status: Status::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_session_config_accepts_offered_durations() {
        for secs in DURATION_CHOICES {
            let cfg = SessionConfig::new(secs, TextCategory::Code, Difficulty::Hard).unwrap();
            assert_eq!(cfg.duration_secs(), secs);
        }
    }

    #[test]
    fn test_session_config_rejects_other_durations() {
        assert_matches!(
            SessionConfig::new(45, TextCategory::Sentences, Difficulty::Easy),
            Err(ConfigError::InvalidDuration(45))
        );
        assert_matches!(validate_duration(0), Err(ConfigError::InvalidDuration(0)));
    }

    #[test]
    fn test_session_config_default() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.duration_secs(), 60);
        assert_eq!(cfg.category, TextCategory::Sentences);
        assert_eq!(cfg.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_session_state_new_is_idle() {
        let state = SessionState::new(30);
        assert_eq!(state.status, Status::Idle);
        assert_eq!(state.remaining_secs, 30);
        assert!(state.typed.is_empty());
        assert_eq!(state.matched, 0);
        assert_eq!(state.errors, 0);
        assert!(state.started_at.is_none());
    }

    #[test]
    fn test_category_and_difficulty_display() {
        assert_eq!(TextCategory::Paragraphs.to_string(), "paragraphs");
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&TextCategory::Code).unwrap();
        assert_eq!(json, "\"code\"");
        let d: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(d, Difficulty::Easy);
    }
}
