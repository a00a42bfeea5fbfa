//! GenerateTermsHandler - Command handler for producing a Term of Reference.
//!
//! Validates the request, optionally drafts the justification, assembles
//! the document and exports both artifacts. A failed DOCX conversion does
//! not fail the command: the Markdown artifact is still returned.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::document::{GeneratedDocument, Jurisdiction};
use crate::domain::foundation::ValidationError;
use crate::domain::request::ContractRequest;
use crate::ports::{
    DocumentExportService, DocumentGenerator, ExportError, ExportedDocument, GenerationOptions,
    TemplateVariant,
};

use super::draft_justification::{
    DraftJustificationCommand, DraftJustificationHandler, JustificationDraft,
};

/// Command to generate a Term of Reference.
#[derive(Debug, Clone)]
pub struct GenerateTermsCommand {
    /// Form contents.
    pub request: ContractRequest,
    /// Template variant to render.
    pub variant: TemplateVariant,
    /// Ask the completion service for a justification draft.
    pub draft_justification: bool,
}

impl GenerateTermsCommand {
    pub fn new(request: ContractRequest) -> Self {
        Self {
            request,
            variant: TemplateVariant::default(),
            draft_justification: false,
        }
    }

    pub fn with_variant(mut self, variant: TemplateVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_draft_justification(mut self, enabled: bool) -> Self {
        self.draft_justification = enabled;
        self
    }
}

/// What happened to the justification draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JustificationStatus {
    /// Drafting was not asked for.
    NotRequested,
    /// Asked for, but no completion service is configured.
    Unavailable,
    /// Draft included in §2.
    Drafted,
    /// Draft failed; static text only.
    Fallback { reason: String },
}

/// Result of successful generation.
#[derive(Debug)]
pub struct GenerateTermsResult {
    /// Correlates the log lines of this generation.
    pub trace_id: String,
    /// The assembled document.
    pub document: GeneratedDocument,
    /// Markdown artifact (always produced).
    pub markdown: ExportedDocument,
    /// DOCX artifact, or why conversion failed.
    pub docx: Result<ExportedDocument, ExportError>,
    /// Justification draft outcome.
    pub justification: JustificationStatus,
}

/// Error type for generation.
#[derive(Debug, Clone, Error)]
pub enum GenerateTermsError {
    /// The request failed validation; nothing was generated.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
}

/// Handler for generating Terms of Reference.
///
/// # Dependencies
///
/// - `DocumentGenerator`: Assemble the document
/// - `DocumentExportService`: Convert markup to DOCX
/// - `DraftJustificationHandler` (optional): Draft the §2 justification
///
/// # Usage
///
/// ```rust,ignore
/// let handler = GenerateTermsHandler::new(generator, exporter, jurisdiction);
/// let result = handler.handle(GenerateTermsCommand::new(request)).await?;
/// ```
pub struct GenerateTermsHandler {
    generator: Arc<dyn DocumentGenerator>,
    exporter: Arc<dyn DocumentExportService>,
    drafter: Option<Arc<DraftJustificationHandler>>,
    jurisdiction: Jurisdiction,
}

impl GenerateTermsHandler {
    pub fn new(
        generator: Arc<dyn DocumentGenerator>,
        exporter: Arc<dyn DocumentExportService>,
        jurisdiction: Jurisdiction,
    ) -> Self {
        Self {
            generator,
            exporter,
            drafter: None,
            jurisdiction,
        }
    }

    /// Enables justification drafting.
    pub fn with_drafter(mut self, drafter: Arc<DraftJustificationHandler>) -> Self {
        self.drafter = Some(drafter);
        self
    }

    pub async fn handle(
        &self,
        cmd: GenerateTermsCommand,
    ) -> Result<GenerateTermsResult, GenerateTermsError> {
        let trace_id = uuid::Uuid::new_v4().to_string();

        // 1. Validate
        if let Err(err) = cmd.request.validate() {
            tracing::warn!(trace_id = %trace_id, error = %err, "Request rejected");
            return Err(err.into());
        }

        // 2. Optional justification draft
        let (drafted, justification) = self.draft(&cmd, &trace_id).await;

        // 3. Assemble
        let mut options = GenerationOptions::for_variant(cmd.variant);
        if let Some(text) = drafted {
            options = options.with_drafted_justification(text);
        }
        let document = self
            .generator
            .generate(&cmd.request, &self.jurisdiction, &options);

        // 4. Markdown artifact
        let stem = self.jurisdiction.artifact_stem();
        let markup = document.to_markdown();
        let markdown = ExportedDocument::from_markdown(markup.clone(), &stem);

        // 5. DOCX artifact
        let docx = self
            .exporter
            .to_docx(&markup)
            .map(|bytes| ExportedDocument::from_docx(bytes, &stem));

        match &docx {
            Ok(artifact) => tracing::info!(
                trace_id = %trace_id,
                variant = %cmd.variant,
                markdown_bytes = markdown.content.len(),
                docx_bytes = artifact.content.len(),
                "Term of Reference generated"
            ),
            Err(err) => tracing::error!(
                trace_id = %trace_id,
                error = %err,
                "DOCX conversion failed, Markdown artifact still available"
            ),
        }

        Ok(GenerateTermsResult {
            trace_id,
            document,
            markdown,
            docx,
            justification,
        })
    }

    async fn draft(
        &self,
        cmd: &GenerateTermsCommand,
        trace_id: &str,
    ) -> (Option<String>, JustificationStatus) {
        if !cmd.draft_justification {
            return (None, JustificationStatus::NotRequested);
        }

        let Some(drafter) = &self.drafter else {
            tracing::warn!(trace_id = %trace_id, "Justification drafting requested but not configured");
            return (None, JustificationStatus::Unavailable);
        };

        let draft = drafter
            .handle(DraftJustificationCommand {
                object: cmd.request.object.clone(),
                municipality: self.jurisdiction.municipality().to_string(),
                trace_id: trace_id.to_string(),
            })
            .await;

        match draft {
            JustificationDraft::Drafted(text) => (Some(text), JustificationStatus::Drafted),
            JustificationDraft::Fallback { reason } => (
                None,
                JustificationStatus::Fallback {
                    reason: reason.to_string(),
                },
            ),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
