//! Feature flags configuration

use serde::Deserialize;

use crate::ports::TemplateVariant;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Ask the completion service for a §2 justification draft
    #[serde(default)]
    pub draft_justification: bool,

    /// Template variant used when the command line does not pick one
    #[serde(default)]
    pub template_variant: TemplateVariant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(!flags.draft_justification);
        assert_eq!(flags.template_variant, TemplateVariant::FreeText);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{
            "draft_justification": true,
            "template_variant": "unit_selection"
        }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(flags.draft_justification);
        assert_eq!(flags.template_variant, TemplateVariant::UnitSelection);
    }
}
