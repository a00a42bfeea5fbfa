//! Application configuration module
//!
//! This module provides type-safe configuration loading from an optional
//! `termref.{yaml,toml,json}` file and environment variables using the
//! `config` and `dotenvy` crates. Environment variables use the `TERMREF`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use termref::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Writing to {}", config.output.directory.display());
//! ```

mod ai;
mod error;
mod features;
mod jurisdiction;
mod output;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use jurisdiction::JurisdictionConfig;
pub use output::OutputConfig;

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TERMREF";

/// Base name of the optional configuration file in the working directory.
pub const CONFIG_FILE: &str = "termref";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Municipality and reference date
    #[serde(default)]
    pub jurisdiction: JurisdictionConfig,

    /// Artifact output
    #[serde(default)]
    pub output: OutputConfig,

    /// Completion service used for justification drafts
    #[serde(default)]
    pub ai: AiConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `termref.yaml` / `termref.toml` / `termref.json` if present
    /// 3. Reads environment variables with `TERMREF` prefix, which win over the file
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TERMREF__JURISDICTION__MUNICIPALITY=Juína-MT` -> `jurisdiction.municipality`
    /// - `TERMREF__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key`
    /// - `TERMREF__FEATURES__DRAFT_JUSTIFICATION=true` -> `features.draft_justification`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// A missing API key is not an error: drafting then falls back to the
    /// static justification text.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.jurisdiction.validate()?;
        self.output.validate()?;
        self.ai.validate()?;
        Ok(())
    }

    /// True when drafting is asked for and a completion service is configured.
    pub fn drafting_configured(&self) -> bool {
        self.features.draft_justification && self.ai.has_openai()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TemplateVariant;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "TERMREF__JURISDICTION__MUNICIPALITY",
        "TERMREF__OUTPUT__DIRECTORY",
        "TERMREF__AI__OPENAI_API_KEY",
        "TERMREF__AI__MODEL",
        "TERMREF__FEATURES__DRAFT_JUSTIFICATION",
        "TERMREF__FEATURES__TEMPLATE_VARIANT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.jurisdiction.municipality, "Brasnorte-MT");
        assert_eq!(config.ai.model, "gpt-4");
        assert!(!config.features.draft_justification);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("TERMREF__JURISDICTION__MUNICIPALITY", "Juína-MT");
        env::set_var("TERMREF__OUTPUT__DIRECTORY", "/tmp/tr");
        env::set_var("TERMREF__AI__MODEL", "gpt-4o");
        env::set_var("TERMREF__FEATURES__TEMPLATE_VARIANT", "unit_selection");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.jurisdiction.municipality, "Juína-MT");
        assert_eq!(config.output.directory, PathBuf::from("/tmp/tr"));
        assert_eq!(config.ai.model, "gpt-4o");
        assert_eq!(config.features.template_variant, TemplateVariant::UnitSelection);
    }

    #[test]
    fn test_drafting_without_api_key_still_validates() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("TERMREF__FEATURES__DRAFT_JUSTIFICATION", "true");
        let without_key = AppConfig::load().unwrap();
        env::set_var("TERMREF__AI__OPENAI_API_KEY", "sk-test");
        let with_key = AppConfig::load().unwrap();
        clear_env();

        assert!(without_key.validate().is_ok());
        assert!(!without_key.drafting_configured());
        assert!(with_key.validate().is_ok());
        assert!(with_key.drafting_configured());
    }
}
