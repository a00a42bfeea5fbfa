//! Local Filesystem Storage Adapter - Implementation of ArtifactStorage.
//!
//! Writes the markup and DOCX artifacts into a single output directory.
//! Uses atomic writes and SHA-256 checksums for data integrity.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::{ArtifactStorage, ExportedDocument, StorageError, StoredArtifact};

/// Maximum artifact size allowed (10 MB).
pub const MAX_ARTIFACT_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage for generated artifacts.
///
/// # Directory Structure
///
/// ```text
/// {output_dir}/
/// ├── TR_Lei_14133_Brasnorte.md
/// └── TR_Lei_14133_Brasnorte.docx
/// ```
///
/// # Atomic Writes
///
/// Content goes to `{filename}.tmp`, is synced, then renamed over the final
/// name, so a crash never leaves a half-written artifact behind.
#[derive(Debug, Clone)]
pub struct LocalArtifactStorage {
    /// Directory all artifacts are written to.
    output_dir: PathBuf,
}

impl LocalArtifactStorage {
    /// Creates a storage writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Computes SHA-256 checksum of the given content.
    pub fn compute_checksum(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }

    /// Rejects names that are empty or could leave the output directory.
    fn validate_filename(filename: &str) -> Result<(), StorageError> {
        let invalid = filename.is_empty()
            || filename.starts_with('.')
            || filename.contains(['/', '\\'])
            || filename.contains("..");
        if invalid {
            return Err(StorageError::invalid_filename(filename));
        }
        Ok(())
    }

    async fn ensure_output_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| self.map_io_error(&self.output_dir, "create directory", e))
    }

    fn map_io_error(&self, path: &Path, action: &str, err: std::io::Error) -> StorageError {
        if err.kind() == ErrorKind::PermissionDenied {
            StorageError::permission_denied(path.display().to_string())
        } else {
            StorageError::io(format!("Failed to {} {}: {}", action, path.display(), err))
        }
    }
}

#[async_trait]
impl ArtifactStorage for LocalArtifactStorage {
    async fn write(&self, artifact: &ExportedDocument) -> Result<StoredArtifact, StorageError> {
        let size = artifact.content.len() as u64;
        if size > MAX_ARTIFACT_SIZE_BYTES {
            return Err(StorageError::file_too_large(size, MAX_ARTIFACT_SIZE_BYTES));
        }
        Self::validate_filename(&artifact.filename)?;

        self.ensure_output_dir().await?;

        let final_path = self.output_dir.join(&artifact.filename);
        let temp_path = self.output_dir.join(format!("{}.tmp", artifact.filename));

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| self.map_io_error(&temp_path, "create temp file", e))?;
        file.write_all(&artifact.content)
            .await
            .map_err(|e| self.map_io_error(&temp_path, "write temp file", e))?;
        file.sync_all()
            .await
            .map_err(|e| self.map_io_error(&temp_path, "sync temp file", e))?;

        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| self.map_io_error(&final_path, "rename temp file to", e))?;

        let checksum = Self::compute_checksum(&artifact.content);
        tracing::info!(
            path = %final_path.display(),
            size_bytes = size,
            format = %artifact.format,
            "Artifact written"
        );

        Ok(StoredArtifact::new(final_path, size, checksum))
    }
}
