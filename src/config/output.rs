//! Output configuration (where and which artifacts are written)

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Artifact output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory artifacts are written to
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Write the `.md` artifact
    #[serde(default = "default_true")]
    pub write_markdown: bool,

    /// Write the `.docx` artifact
    #[serde(default = "default_true")]
    pub write_docx: bool,
}

impl OutputConfig {
    /// Validate output configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.write_markdown && !self.write_docx {
            return Err(ValidationError::NoArtifactsEnabled);
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            write_markdown: true,
            write_docx: true,
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}
