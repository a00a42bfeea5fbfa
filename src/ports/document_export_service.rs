//! Document Export Service Port - Format conversion interface.
//!
//! This port defines the contract for converting Term of Reference markup
//! into a word-processing document. Application handlers depend on this
//! trait, while adapters (like DocxExportService) provide the
//! implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for exporting document markup to a rich document format.
///
/// # Contract
///
/// Implementations must:
/// - Process the markup line by line
/// - Turn `# `, `## ` and `### ` lines into headings of level 1-3
/// - Emit every other line verbatim as a paragraph
/// - Report clear errors for conversion failures
///
/// # Usage
///
/// ```rust,ignore
/// let export_service: &dyn DocumentExportService = get_service();
/// let docx_bytes = export_service.to_docx("# Termo\n\nConteúdo")?;
/// ```
pub trait DocumentExportService: Send + Sync {
    /// Convert markup content to DOCX bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the package cannot be written.
    fn to_docx(&self, markup: &str) -> Result<Vec<u8>, ExportError>;
}

/// Export formats offered for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Raw markup (no conversion needed).
    Markdown,
    /// Office Open XML word-processing document.
    Docx,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Docx => "docx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Docx => write!(f, "docx"),
        }
    }
}

/// Exported document with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl ExportedDocument {
    /// Create a new exported document.
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }

    /// Create from markup content (UTF-8, no conversion).
    pub fn from_markdown(markdown: String, base_filename: &str) -> Self {
        Self::new(markdown.into_bytes(), ExportFormat::Markdown, base_filename)
    }

    /// Create from DOCX bytes.
    pub fn from_docx(docx_bytes: Vec<u8>, base_filename: &str) -> Self {
        Self::new(docx_bytes, ExportFormat::Docx, base_filename)
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Writing the DOCX package failed.
    #[error("DOCX conversion failed: {0}")]
    DocxConversionFailed(String),

    /// I/O error during conversion.
    #[error("I/O error during export: {0}")]
    IoError(String),
}

impl ExportError {
    /// Create a DOCX conversion error.
    pub fn docx_failed(reason: impl Into<String>) -> Self {
        Self::DocxConversionFailed(reason.into())
    }

    /// Create an I/O error.
    pub fn io_error(reason: impl Into<String>) -> Self {
        Self::IoError(reason.into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
