use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Tuning for the title suggestion lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestSettings {
    pub throttle: Duration,
    pub max_questions: u32,
    pub max_documents: u32,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            throttle: Duration::from_millis(500),
            max_questions: 2,
            max_documents: 2,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub csrf_token: Option<String>,
    pub suggest: SuggestSettings,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SuggestSettings::default();

        let throttle_ms = match lookup("SUGGEST_THROTTLE_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SUGGEST_THROTTLE_MS must be a valid number")?,
            None => defaults.throttle.as_millis() as u64,
        };
        let max_questions = match lookup("SUGGEST_MAX_QUESTIONS") {
            Some(raw) => raw
                .parse()
                .context("SUGGEST_MAX_QUESTIONS must be a valid number")?,
            None => defaults.max_questions,
        };
        let max_documents = match lookup("SUGGEST_MAX_DOCUMENTS") {
            Some(raw) => raw
                .parse()
                .context("SUGGEST_MAX_DOCUMENTS must be a valid number")?,
            None => defaults.max_documents,
        };

        Ok(Self {
            base_url: lookup("KITSUNE_BASE_URL").context("KITSUNE_BASE_URL must be set")?,
            csrf_token: lookup("KITSUNE_CSRF_TOKEN").filter(|t| !t.is_empty()),
            suggest: SuggestSettings {
                throttle: Duration::from_millis(throttle_ms),
                max_questions,
                max_documents,
            },
        })
    }
}
