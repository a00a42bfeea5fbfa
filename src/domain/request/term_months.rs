//! Contract term value object (months, 1-60).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Contract term in months, bounded to `[1, 60]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TermMonths(u32);

impl TermMonths {
    /// Shortest accepted term.
    pub const MIN: u32 = 1;

    /// Longest accepted term.
    pub const MAX: u32 = 60;

    /// Creates a term, returning error if out of range.
    pub fn new(months: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&months) {
            return Err(ValidationError::out_of_range(
                "term_months",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                i64::from(months),
            ));
        }
        Ok(Self(months))
    }

    /// Returns the number of months.
    pub fn months(&self) -> u32 {
        self.0
    }
}

impl Default for TermMonths {
    fn default() -> Self {
        Self(12)
    }
}

impl TryFrom<u32> for TermMonths {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TermMonths> for u32 {
    fn from(term: TermMonths) -> Self {
        term.0
    }
}

impl fmt::Display for TermMonths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_accepts_bounds() {
        assert_eq!(TermMonths::new(1).unwrap().months(), 1);
        assert_eq!(TermMonths::new(60).unwrap().months(), 60);
    }

    #[test]
    fn term_rejects_zero_and_over_sixty() {
        assert!(TermMonths::new(0).is_err());
        match TermMonths::new(61) {
            Err(ValidationError::OutOfRange { field, min, max, actual }) => {
                assert_eq!(field, "term_months");
                assert_eq!(min, 1);
                assert_eq!(max, 60);
                assert_eq!(actual, 61);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
    }

    #[test]
    fn term_defaults_to_twelve_months() {
        assert_eq!(TermMonths::default().months(), 12);
    }

    #[test]
    fn term_deserialization_enforces_bounds() {
        let ok: TermMonths = serde_json::from_str("24").unwrap();
        assert_eq!(ok.months(), 24);
        assert!(serde_json::from_str::<TermMonths>("0").is_err());
        assert!(serde_json::from_str::<TermMonths>("72").is_err());
    }

    #[test]
    fn term_serializes_as_plain_number() {
        let json = serde_json::to_string(&TermMonths::new(36).unwrap()).unwrap();
        assert_eq!(json, "36");
    }
}
