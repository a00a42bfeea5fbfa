//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `document` - Template generator, DOCX export and local artifact storage
//! - `ai` - Text-completion providers (OpenAI, mock)
//! - `request_file` - Reads requests from YAML/JSON files

pub mod ai;
pub mod document;
pub mod request_file;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use document::{DocxExportService, LocalArtifactStorage, TemplateDocumentGenerator};
pub use request_file::{read_request, RequestFileError, RequestFormat};
