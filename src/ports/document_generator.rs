//! Document Generator Port - Term of Reference assembly interface.
//!
//! This port defines the contract for turning a contracting request into a
//! structured document. Application handlers depend on this trait, while
//! adapters (like TemplateDocumentGenerator) provide the implementation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::document::{GeneratedDocument, Jurisdiction};
use crate::domain::foundation::ValidationError;
use crate::domain::request::ContractRequest;

/// Port for assembling a Term of Reference.
///
/// # Contract
///
/// Implementations must:
/// - Always produce a document, whatever the request holds
/// - Substitute a placeholder when the object description is blank
/// - Omit every summary entry whose value is blank
/// - Be deterministic for identical request, jurisdiction and options
///
/// # Usage
///
/// ```rust,ignore
/// let generator: &dyn DocumentGenerator = get_generator();
/// let jurisdiction = Jurisdiction::today("Brasnorte-MT");
/// let document = generator.generate(&request, &jurisdiction, &GenerationOptions::default());
/// println!("{}", document.to_markdown());
/// ```
pub trait DocumentGenerator: Send + Sync {
    /// Assemble the full document.
    fn generate(
        &self,
        request: &ContractRequest,
        jurisdiction: &Jurisdiction,
        options: &GenerationOptions,
    ) -> GeneratedDocument;
}

/// Options for document generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Wording variant of the opening section.
    pub variant: TemplateVariant,

    /// Justification paragraph drafted by an external writer, if any.
    pub drafted_justification: Option<String>,
}

impl GenerationOptions {
    /// Options for the given variant with no drafted text.
    pub fn for_variant(variant: TemplateVariant) -> Self {
        Self {
            variant,
            drafted_justification: None,
        }
    }

    /// Attaches a drafted justification paragraph.
    pub fn with_drafted_justification(mut self, text: impl Into<String>) -> Self {
        self.drafted_justification = Some(text.into());
        self
    }
}

/// Wording variants of the opening section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVariant {
    /// Descriptive preamble: scope, normative basis, term, supply form.
    #[default]
    FreeText,

    /// Numbered clauses 1.1-1.4 citing the municipal decrees, paired with
    /// the unit catalog and the term in months.
    UnitSelection,
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateVariant::FreeText => write!(f, "free_text"),
            TemplateVariant::UnitSelection => write!(f, "unit_selection"),
        }
    }
}

impl FromStr for TemplateVariant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "free_text" | "free" => Ok(TemplateVariant::FreeText),
            "unit_selection" | "units" => Ok(TemplateVariant::UnitSelection),
            other => Err(ValidationError::invalid_format(
                "template_variant",
                format!("unknown variant '{}'", other),
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
