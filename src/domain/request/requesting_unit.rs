//! Catalog of municipal units that may raise a contracting need.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A requesting unit from the fixed municipal catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestingUnit {
    MayorsOffice,
    Administration,
    SocialAssistance,
    IndigenousAffairs,
    AgrarianDevelopmentEnvironment,
    Education,
    Sports,
    Finance,
    Infrastructure,
    PlanningTourismCulture,
    Health,
}

impl RequestingUnit {
    /// Every unit, in catalog order.
    pub const ALL: [RequestingUnit; 11] = [
        RequestingUnit::MayorsOffice,
        RequestingUnit::Administration,
        RequestingUnit::SocialAssistance,
        RequestingUnit::IndigenousAffairs,
        RequestingUnit::AgrarianDevelopmentEnvironment,
        RequestingUnit::Education,
        RequestingUnit::Sports,
        RequestingUnit::Finance,
        RequestingUnit::Infrastructure,
        RequestingUnit::PlanningTourismCulture,
        RequestingUnit::Health,
    ];

    /// Official name printed in the document.
    pub fn label(&self) -> &'static str {
        match self {
            RequestingUnit::MayorsOffice => "Gabinete Municipal",
            RequestingUnit::Administration => "Secretaria Municipal de Administração",
            RequestingUnit::SocialAssistance => "Secretaria Municipal de Assistencia Social",
            RequestingUnit::IndigenousAffairs => "Secretaria Municipal de Assuntos Indigenas",
            RequestingUnit::AgrarianDevelopmentEnvironment => {
                "Secretaria Municipal de Des. Agrario e Meio Ambiente"
            }
            RequestingUnit::Education => "Secretaria Municipal de Educação",
            RequestingUnit::Sports => "Secretaria Municipal de Esportes",
            RequestingUnit::Finance => "Secretaria Municipal de Finanças",
            RequestingUnit::Infrastructure => "Secretaria Municipal de Infraestrutura",
            RequestingUnit::PlanningTourismCulture => {
                "Secretaria Municipal de Planejamento, Turismo e Cultura"
            }
            RequestingUnit::Health => "Secretaria Municipal de Saúde",
        }
    }

    /// Stable key used in request files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            RequestingUnit::MayorsOffice => "mayors_office",
            RequestingUnit::Administration => "administration",
            RequestingUnit::SocialAssistance => "social_assistance",
            RequestingUnit::IndigenousAffairs => "indigenous_affairs",
            RequestingUnit::AgrarianDevelopmentEnvironment => "agrarian_development_environment",
            RequestingUnit::Education => "education",
            RequestingUnit::Sports => "sports",
            RequestingUnit::Finance => "finance",
            RequestingUnit::Infrastructure => "infrastructure",
            RequestingUnit::PlanningTourismCulture => "planning_tourism_culture",
            RequestingUnit::Health => "health",
        }
    }
}

impl fmt::Display for RequestingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RequestingUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        RequestingUnit::ALL
            .into_iter()
            .find(|unit| unit.key() == key)
            .ok_or_else(|| {
                ValidationError::invalid_format("selected_units", format!("unknown unit '{}'", s))
            })
    }
}

/// Joins unit labels the way the summary block prints them.
pub fn join_labels(units: &[RequestingUnit]) -> String {
    units
        .iter()
        .map(RequestingUnit::label)
        .collect::<Vec<_>>()
        .join("; ")
}
