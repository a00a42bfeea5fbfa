//! The contracting request collected from the user.

use serde::{Deserialize, Serialize};

use super::requesting_unit::{join_labels, RequestingUnit};
use super::term_months::TermMonths;
use crate::domain::foundation::{is_filled, ValidationError};

/// Everything the user supplied for one Term of Reference.
///
/// Only `object` is required. Every other free-text field is optional and
/// blank values never reach the document. Which fields a caller fills in
/// depends on the form it shows: the free-text form fills
/// `requesting_units`, the catalog form fills `selected_units` and
/// `term_months` instead. The assembler handles both the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractRequest {
    /// Detailed object of the contracting (required).
    pub object: String,

    /// Requesting unit(s), free text.
    pub requesting_units: String,

    /// Requesting unit(s), picked from the municipal catalog.
    pub selected_units: Vec<RequestingUnit>,

    /// Estimated quantities / supply unit.
    pub quantities: String,

    /// Delivery or service location(s).
    pub locations: String,

    /// Desired deadline(s).
    pub deadlines: String,

    /// Contract term in months.
    pub term_months: Option<TermMonths>,

    /// Intended execution/supply regime.
    pub regime: String,

    /// Applicable technical references (ABNT, INMETRO, sector norms).
    pub technical_references: String,

    /// Sustainability and accessibility notes.
    pub sustainability: String,

    /// Relevant risks or constraints.
    pub risks: String,

    /// Available internal justifications (ETP, studies, opinions).
    pub internal_justifications: String,

    /// Add the hybrid/collaborative "Opção C" to the solution options.
    pub include_hybrid_option: bool,

    /// Add the six standard KPI/SLA indicators to the measurement criteria.
    pub include_standard_kpis: bool,
}

impl Default for ContractRequest {
    fn default() -> Self {
        Self {
            object: String::new(),
            requesting_units: String::new(),
            selected_units: Vec::new(),
            quantities: String::new(),
            locations: String::new(),
            deadlines: String::new(),
            term_months: None,
            regime: String::new(),
            technical_references: String::new(),
            sustainability: String::new(),
            risks: String::new(),
            internal_justifications: String::new(),
            include_hybrid_option: true,
            include_standard_kpis: true,
        }
    }
}

impl ContractRequest {
    /// Creates a request with only the object filled in.
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            ..Self::default()
        }
    }

    /// Checks the request before generation.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` when the object description is
    /// blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_object() {
            return Err(ValidationError::empty_field("object"));
        }
        Ok(())
    }

    /// True when the object description carries content.
    pub fn has_object(&self) -> bool {
        is_filled(&self.object)
    }

    /// Requesting units as printed in the summary block.
    ///
    /// Catalog selections win over the free-text field.
    pub fn units_summary(&self) -> String {
        if self.selected_units.is_empty() {
            self.requesting_units.trim().to_string()
        } else {
            join_labels(&self.selected_units)
        }
    }

    /// Contract term, falling back to the 12-month default.
    pub fn term_or_default(&self) -> TermMonths {
        self.term_months.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_enables_both_toggles() {
        let request = ContractRequest::default();
        assert!(request.include_hybrid_option);
        assert!(request.include_standard_kpis);
        assert!(request.object.is_empty());
    }

    #[test]
    fn validate_rejects_blank_object() {
        let err = ContractRequest::new("   ").validate().unwrap_err();
        assert_eq!(err, ValidationError::empty_field("object"));
    }

    #[test]
    fn validate_accepts_object_with_other_fields_blank() {
        assert!(ContractRequest::new("Serviços de manutenção predial")
            .validate()
            .is_ok());
    }

    #[test]
    fn units_summary_prefers_catalog_selection() {
        let request = ContractRequest {
            requesting_units: "Secretaria X".to_string(),
            selected_units: vec![RequestingUnit::Education, RequestingUnit::Health],
            ..ContractRequest::new("obj")
        };
        assert_eq!(
            request.units_summary(),
            "Secretaria Municipal de Educação; Secretaria Municipal de Saúde"
        );
    }

    #[test]
    fn units_summary_falls_back_to_trimmed_free_text() {
        let request = ContractRequest {
            requesting_units: "  Secretaria de Administração  ".to_string(),
            ..ContractRequest::new("obj")
        };
        assert_eq!(request.units_summary(), "Secretaria de Administração");
    }

    #[test]
    fn deserializes_partial_yaml_with_defaults() {
        let yaml = "object: Locação de veículos\nselected_units: [finance, sports]\nterm_months: 24\ninclude_standard_kpis: false\n";
        let request: ContractRequest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(request.object, "Locação de veículos");
        assert_eq!(request.selected_units.len(), 2);
        assert_eq!(request.term_or_default().months(), 24);
        assert!(request.include_hybrid_option);
        assert!(!request.include_standard_kpis);
        assert!(request.quantities.is_empty());
    }

    #[test]
    fn deserialization_rejects_out_of_range_term() {
        let json = r#"{"object": "x", "term_months": 90}"#;
        assert!(serde_json::from_str::<ContractRequest>(json).is_err());
    }

    #[test]
    fn term_or_default_is_twelve_when_absent() {
        assert_eq!(ContractRequest::new("x").term_or_default().months(), 12);
    }
}
