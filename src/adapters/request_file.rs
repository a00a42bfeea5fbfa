//! Request file adapter - Reads a ContractRequest from YAML or JSON.
//!
//! The format is picked by extension: `.json` is JSON, anything else is
//! read as YAML (which also accepts most JSON).

use std::path::Path;

use thiserror::Error;

use crate::domain::request::ContractRequest;

/// Supported request file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Yaml,
    Json,
}

impl RequestFormat {
    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => RequestFormat::Json,
            _ => RequestFormat::Yaml,
        }
    }
}

/// Errors reading a request file.
#[derive(Debug, Error)]
pub enum RequestFileError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML request: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses request content in the given format.
pub fn parse_request(content: &str, format: RequestFormat) -> Result<ContractRequest, RequestFileError> {
    let request = match format {
        RequestFormat::Json => serde_json::from_str(content)?,
        RequestFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(request)
}

/// Reads and parses a request file.
pub async fn read_request(path: &Path) -> Result<ContractRequest, RequestFileError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RequestFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let request = parse_request(&content, RequestFormat::from_path(path))?;
    tracing::debug!(path = %path.display(), "Request loaded");
    Ok(request)
}
