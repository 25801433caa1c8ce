//! Profile module - rule-set variants and their built-in weight tables

use crate::category::Category;
use crate::weights::{CategoryWeight, WeightSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which rule set governs scoring and hard overrides
///
/// - Technician: screening of individual field technicians; political
///   affiliation and civil/criminal litigation are disqualifying
/// - Organization: full compliance analysis of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Individual technician screening
    Technician,

    /// Organization due diligence
    #[default]
    Organization,
}

impl ProfileKind {
    /// Both profile kinds
    pub const ALL: [ProfileKind; 2] = [ProfileKind::Technician, ProfileKind::Organization];

    /// Get the profile name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Technician => "technician",
            ProfileKind::Organization => "organization",
        }
    }

    /// Parse a profile kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "technician" | "tech" => Some(ProfileKind::Technician),
            "organization" | "org" => Some(ProfileKind::Organization),
            _ => None,
        }
    }

    /// Built-in weight table for this profile
    pub fn default_weights(&self) -> WeightSet {
        let table: &[(Category, u8, &str)] = match self {
            ProfileKind::Technician => &TECHNICIAN_DEFAULTS,
            ProfileKind::Organization => &ORGANIZATION_DEFAULTS,
        };

        table
            .iter()
            .map(|(category, weight, description)| {
                CategoryWeight::new(*category, *weight, *description)
            })
            .collect()
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid profile kind: {}", s))
    }
}

const ORGANIZATION_DEFAULTS: [(Category, u8, &str); Category::COUNT] = [
    (Category::Registration, 5, "Basic registration information"),
    (Category::Ownership, 7, "Corporate structure and shareholdings"),
    (Category::Participations, 6, "Business ties and equity participations"),
    (Category::PoliticalExposure, 9, "Political exposure and PEP relationships"),
    (Category::NationalSanctions, 10, "National sanctions and restrictions"),
    (Category::InternationalSanctions, 8, "International sanctions and restrictions"),
    (Category::JudicialProcesses, 7, "Litigation and court proceedings"),
    (Category::AdministrativeProcesses, 6, "Administrative proceedings"),
];

const TECHNICIAN_DEFAULTS: [(Category, u8, &str); Category::COUNT] = [
    (Category::Registration, 6, "Identity and registration status"),
    (Category::Ownership, 3, "Companies the technician is a partner of"),
    (Category::Participations, 3, "Business ties of the technician"),
    (Category::PoliticalExposure, 10, "Party affiliation disqualifies a technician"),
    (Category::NationalSanctions, 9, "National sanctions and restrictions"),
    (Category::InternationalSanctions, 6, "International sanctions and restrictions"),
    (Category::JudicialProcesses, 10, "Civil and criminal proceedings disqualify"),
    (Category::AdministrativeProcesses, 5, "Administrative proceedings"),
];
