//! Category module - the closed set of dossier sections that carry a weight

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a dossier section
///
/// The set is fixed; weights are configured per category and the scoring
/// engine looks them up by enum index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Registration data and status
    Registration,

    /// Shareholders and partners
    Ownership,

    /// Equity participations in other entities
    Participations,

    /// Politically exposed person checks
    PoliticalExposure,

    /// Domestic sanction registries
    NationalSanctions,

    /// International sanction lists
    InternationalSanctions,

    /// Court proceedings
    JudicialProcesses,

    /// Administrative proceedings
    AdministrativeProcesses,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 8;

    /// Every category, in display order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Registration,
        Category::Ownership,
        Category::Participations,
        Category::PoliticalExposure,
        Category::NationalSanctions,
        Category::InternationalSanctions,
        Category::JudicialProcesses,
        Category::AdministrativeProcesses,
    ];

    /// Position of this category in [`Category::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Stable machine key, also used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Registration => "registration",
            Category::Ownership => "ownership",
            Category::Participations => "participations",
            Category::PoliticalExposure => "political_exposure",
            Category::NationalSanctions => "national_sanctions",
            Category::InternationalSanctions => "international_sanctions",
            Category::JudicialProcesses => "judicial_processes",
            Category::AdministrativeProcesses => "administrative_processes",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Registration => "Registration Data",
            Category::Ownership => "Partners and Shareholders",
            Category::Participations => "Relationships and Participations",
            Category::PoliticalExposure => "Political Exposure (PEP)",
            Category::NationalSanctions => "National Sanctions and Records",
            Category::InternationalSanctions => "International Sanctions and Records",
            Category::JudicialProcesses => "Judicial Processes",
            Category::AdministrativeProcesses => "Administrative Processes",
        }
    }

    /// Parse a category from its key (case-insensitive, `-` accepted for `_`)
    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Category::ALL.into_iter().find(|c| c.as_str() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

/// Severity label for a configured weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightLevel {
    /// 1-2
    Minimal,
    /// 3-4
    Low,
    /// 5-6
    Medium,
    /// 7-8
    High,
    /// 9-10
    Critical,
}

impl WeightLevel {
    /// Classify a weight value
    pub fn of(weight: u8) -> Self {
        match weight {
            9.. => WeightLevel::Critical,
            7..=8 => WeightLevel::High,
            5..=6 => WeightLevel::Medium,
            3..=4 => WeightLevel::Low,
            _ => WeightLevel::Minimal,
        }
    }

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightLevel::Minimal => "minimal",
            WeightLevel::Low => "low",
            WeightLevel::Medium => "medium",
            WeightLevel::High => "high",
            WeightLevel::Critical => "critical",
        }
    }
}
