//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("requests_per_minute must be greater than zero")]
    InvalidRequestBudget,

    #[error("Invalid AI base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Municipality must not be blank")]
    EmptyMunicipality,

    #[error("Municipality cannot be used in a file name: {0}")]
    InvalidMunicipality(String),

    #[error("Invalid reference date (expected dd/mm/yyyy): {0}")]
    InvalidReferenceDate(String),

    #[error("At least one artifact format must be enabled")]
    NoArtifactsEnabled,
}
