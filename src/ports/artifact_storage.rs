//! Artifact Storage Port - Where exported documents are written.
//!
//! The command line front end writes both downloadable artifacts to a
//! directory. Handlers depend on this trait, while adapters (like
//! LocalArtifactStorage) provide the implementation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::ExportedDocument;

/// Port for persisting an exported artifact.
///
/// # Contract
///
/// Implementations must:
/// - Write atomically (no partial content on failure)
/// - Use the artifact's suggested filename
/// - Report the SHA-256 checksum of what was written
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    /// Write the artifact, replacing any previous file with the same name.
    async fn write(&self, artifact: &ExportedDocument) -> Result<StoredArtifact, StorageError>;
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    /// Where the file ended up.
    pub path: PathBuf,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the content.
    pub checksum: String,
}

impl StoredArtifact {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64, checksum: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            checksum: checksum.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Errors that can occur while writing artifacts.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Permission denied accessing the file.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },

    /// Artifact name would escape the output directory.
    #[error("Invalid artifact filename: {filename}")]
    InvalidFilename { filename: String },

    /// File is too large.
    #[error("File too large: {size_bytes} bytes (max: {max_bytes})")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

impl StorageError {
    /// Creates a permission denied error.
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an invalid filename error.
    pub fn invalid_filename(filename: impl Into<String>) -> Self {
        Self::InvalidFilename {
            filename: filename.into(),
        }
    }

    /// Creates a file too large error.
    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }
}
