//! Document adapters - Implementations for document generation, export and storage.
//!
//! This module provides adapters for the document-related ports:
//! - `TemplateDocumentGenerator` - Assembles the Term of Reference from section builders
//! - `DocxExportService` - Converts markup into a DOCX package
//! - `LocalArtifactStorage` - Writes artifacts to a local directory

mod docx_export_service;
mod docx_reader;
mod local_artifact_storage;
pub mod sections;
mod template_generator;

pub use docx_export_service::{heading_style_id, DocxExportService};
pub use docx_reader::docx_outline;
pub use local_artifact_storage::{LocalArtifactStorage, MAX_ARTIFACT_SIZE_BYTES};
pub use template_generator::TemplateDocumentGenerator;
