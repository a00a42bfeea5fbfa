//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DocumentGenerator` - Assembles a Term of Reference from a request
//! - `DocumentExportService` - Converts markup to a word-processing document
//! - `ArtifactStorage` - Writes downloadable artifacts
//! - `AIProvider` - External text-completion service

mod ai_provider;
mod artifact_storage;
mod document_export_service;
mod document_generator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};
pub use artifact_storage::{ArtifactStorage, StorageError, StoredArtifact};
pub use document_export_service::{
    DocumentExportService, ExportError, ExportFormat, ExportedDocument,
};
pub use document_generator::{DocumentGenerator, GenerationOptions, TemplateVariant};
