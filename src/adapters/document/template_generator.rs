//! Template-based Term of Reference generator.
//!
//! Assembles the document from a fixed, ordered list of section builders.
//! This is the primary implementation of the DocumentGenerator port.

use crate::domain::document::{GeneratedDocument, Jurisdiction};
use crate::domain::request::ContractRequest;
use crate::ports::{DocumentGenerator, GenerationOptions};

use super::sections::{SectionBuilder, SectionContext, SECTIONS};

/// Template-based implementation of DocumentGenerator.
///
/// Stateless: every call builds a fresh document from the request, the
/// jurisdiction and the options, so identical inputs give identical output.
#[derive(Debug, Clone)]
pub struct TemplateDocumentGenerator {
    sections: &'static [SectionBuilder],
}

impl TemplateDocumentGenerator {
    /// Creates a generator with the standard section sequence.
    pub fn new() -> Self {
        Self {
            sections: &SECTIONS,
        }
    }
}

impl Default for TemplateDocumentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentGenerator for TemplateDocumentGenerator {
    fn generate(
        &self,
        request: &ContractRequest,
        jurisdiction: &Jurisdiction,
        options: &GenerationOptions,
    ) -> GeneratedDocument {
        let ctx = SectionContext::new(request, jurisdiction, options);
        let blocks = self.sections.iter().flat_map(|build| build(&ctx)).collect();
        GeneratedDocument::new(blocks)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
