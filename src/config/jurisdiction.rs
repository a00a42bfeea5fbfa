//! Jurisdiction configuration (municipality and reference date)

use serde::Deserialize;

use crate::domain::document::{parse_reference_date, Jurisdiction, DEFAULT_MUNICIPALITY};
use crate::domain::foundation::is_filled;

use super::error::ValidationError;

/// Which municipality the documents are issued for
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionConfig {
    /// Municipality and state, e.g. `Brasnorte-MT`
    #[serde(default = "default_municipality")]
    pub municipality: String,

    /// Fixed reference date (`dd/mm/yyyy`); today when absent
    #[serde(default)]
    pub reference_date: Option<String>,
}

impl JurisdictionConfig {
    /// Validate jurisdiction configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_filled(&self.municipality) {
            return Err(ValidationError::EmptyMunicipality);
        }
        if !usable_in_file_name(&self.municipality) {
            return Err(ValidationError::InvalidMunicipality(self.municipality.clone()));
        }
        if let Some(date) = &self.reference_date {
            parse_reference_date(date)
                .map_err(|_| ValidationError::InvalidReferenceDate(date.clone()))?;
        }
        Ok(())
    }

    /// Builds the jurisdiction, dated today unless a date is configured.
    pub fn to_jurisdiction(&self) -> Result<Jurisdiction, ValidationError> {
        self.validate()?;
        let municipality = self.municipality.trim();
        match &self.reference_date {
            Some(date) => {
                let date = parse_reference_date(date)
                    .map_err(|_| ValidationError::InvalidReferenceDate(date.clone()))?;
                Ok(Jurisdiction::new(municipality, date))
            }
            None => Ok(Jurisdiction::today(municipality)),
        }
    }
}

impl Default for JurisdictionConfig {
    fn default() -> Self {
        Self {
            municipality: default_municipality(),
            reference_date: None,
        }
    }
}

fn default_municipality() -> String {
    DEFAULT_MUNICIPALITY.to_string()
}

/// The municipality name ends up in the artifact file names.
fn usable_in_file_name(municipality: &str) -> bool {
    let tag = Jurisdiction::today(municipality.trim()).file_tag();
    !tag.is_empty()
        && !tag.starts_with('.')
        && !municipality
            .chars()
            .any(|c| c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_defaults() {
        let config = JurisdictionConfig::default();
        assert_eq!(config.municipality, "Brasnorte-MT");
        assert!(config.reference_date.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fixed_date() {
        let config = JurisdictionConfig {
            municipality: " Juína-MT ".to_string(),
            reference_date: Some("01/02/2026".to_string()),
        };
        let jurisdiction = config.to_jurisdiction().unwrap();
        assert_eq!(jurisdiction.municipality(), "Juína-MT");
        assert_eq!(
            jurisdiction.reference_date(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_validation_errors() {
        let blank = JurisdictionConfig {
            municipality: "  ".to_string(),
            reference_date: None,
        };
        assert_eq!(blank.validate(), Err(ValidationError::EmptyMunicipality));

        let bad_date = JurisdictionConfig {
            reference_date: Some("2026-02-01".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad_date.validate(),
            Err(ValidationError::InvalidReferenceDate(_))
        ));
    }

    #[test]
    fn test_municipality_must_fit_a_file_name() {
        for name in ["Cuiabá/MT", "..\\Cuiabá-MT", "-MT", ".oculto-MT", "Sinop:MT"] {
            let config = JurisdictionConfig {
                municipality: name.to_string(),
                reference_date: None,
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidMunicipality(name.to_string())),
                "{name}"
            );
        }

        let accented = JurisdictionConfig {
            municipality: "Nova Maringá-MT".to_string(),
            reference_date: None,
        };
        assert!(accented.validate().is_ok());
    }
}
