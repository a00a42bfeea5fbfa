//! AI provider configuration
//!
//! Only used when justification drafting is enabled. The API key is held
//! as a secret and never printed by `Debug`.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<SecretString>,

    /// Chat model used for drafting
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Deadline for one draft, retries included, in seconds
    #[serde(default = "default_draft_deadline")]
    pub draft_deadline_secs: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per draft
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Outbound call budget per minute
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get draft deadline as Duration
    pub fn draft_deadline(&self) -> Duration {
        Duration::from_secs(self.draft_deadline_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.draft_deadline_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature(self.temperature));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.requests_per_minute == 0 {
            return Err(ValidationError::InvalidRequestBudget);
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            draft_deadline_secs: default_draft_deadline(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

fn default_draft_deadline() -> u64 {
    90
}

fn default_temperature() -> f32 {
    0.4
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_requests_per_minute() -> u32 {
    10
}
