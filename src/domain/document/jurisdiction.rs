//! Jurisdiction the document is issued for.

use chrono::{Local, NaiveDate};

use crate::domain::foundation::ValidationError;

/// Statute every Term of Reference is grounded on.
pub const LAW_REFERENCE: &str = "Lei nº 14.133/2021";

/// Statute tag used in artifact file names.
pub const LAW_FILE_TAG: &str = "Lei_14133";

/// Municipality issuing the document.
pub const DEFAULT_MUNICIPALITY: &str = "Brasnorte-MT";

/// Date format printed in the document header.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Fixed jurisdiction name plus the reference date captured at assembly time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jurisdiction {
    municipality: String,
    reference_date: NaiveDate,
}

impl Jurisdiction {
    pub fn new(municipality: impl Into<String>, reference_date: NaiveDate) -> Self {
        Self {
            municipality: municipality.into(),
            reference_date,
        }
    }

    /// Jurisdiction dated with the local calendar date.
    pub fn today(municipality: impl Into<String>) -> Self {
        Self::new(municipality, Local::now().date_naive())
    }

    pub fn municipality(&self) -> &str {
        &self.municipality
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Reference date as `dd/mm/yyyy`.
    pub fn formatted_date(&self) -> String {
        self.reference_date.format(DATE_FORMAT).to_string()
    }

    /// Municipality name without the state suffix, safe for file names.
    pub fn file_tag(&self) -> String {
        self.municipality
            .split('-')
            .next()
            .unwrap_or_default()
            .trim()
            .replace(' ', "_")
    }

    /// Base file name shared by both artifacts, e.g. `TR_Lei_14133_Brasnorte`.
    pub fn artifact_stem(&self) -> String {
        format!("TR_{}_{}", LAW_FILE_TAG, self.file_tag())
    }
}

/// Parses a `dd/mm/yyyy` date as printed in the document.
pub fn parse_reference_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| ValidationError::invalid_format("date", format!("expected dd/mm/yyyy: {}", e)))
}
