//! Scoring module - reduces a dossier to a 0-100 compliance score
//!
//! The engine keeps a running weighted sum and weight total over the sections
//! present in the dossier:
//! 1. Each present section yields a raw score in `[0, 100]`
//! 2. The raw score is multiplied by its category weight (fallback 5)
//! 3. The final score is the rounded weighted mean, or 100 when no section
//!    is present
//!
//! Profile-specific rules (political exposure and judicial processes) are
//! dispatched through [`ProfileRules`], one implementation per
//! [`ProfileKind`].

use crate::category::Category;
use crate::dossier::{
    AdministrativeProcesses, ComplianceDossier, ExposureLevel, JudicialProcesses, Participations,
    PoliticalExposure, ProcessSide, RegistrationData, RegistrationStatus, SanctionTier, Sanctions,
};
use crate::profile::ProfileKind;
use crate::weights::{WeightSet, WeightTable};
use serde::{Deserialize, Serialize};

/// Raw score every section starts from
pub const SECTION_BASE: i32 = 100;

/// Final score when the dossier carries no section at all
pub const NO_EVIDENCE_SCORE: u8 = 100;

/// Rule that forced a section to zero regardless of its weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardOverride {
    /// Technician who is directly politically exposed
    TechnicianPoliticalExposure,

    /// Technician with a civil or criminal proceeding
    TechnicianCivilOrCriminalProcess,
}

impl HardOverride {
    /// Human readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            HardOverride::TechnicianPoliticalExposure => {
                "technician is a politically exposed person"
            }
            HardOverride::TechnicianCivilOrCriminalProcess => {
                "technician is party to a civil or criminal proceeding"
            }
        }
    }
}

/// Raw outcome of a single section rule, before weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOutcome {
    /// Raw score; may go below zero before clamping
    pub raw: i32,

    /// Override that fired, if any
    pub hard_override: Option<HardOverride>,
}

impl SectionOutcome {
    fn scored(raw: i32) -> Self {
        Self {
            raw,
            hard_override: None,
        }
    }

    fn overridden(rule: HardOverride) -> Self {
        Self {
            raw: 0,
            hard_override: Some(rule),
        }
    }
}

/// Contribution of one section to the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    /// Category the section belongs to
    pub category: Category,

    /// Raw score in `[0, 100]`
    pub raw_score: u8,

    /// Weight applied
    pub weight: u8,

    /// Override that forced the raw score to zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_override: Option<HardOverride>,
}

/// Final score with its per-section breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Final score in `[0, 100]`
    pub score: u8,

    /// Profile the dossier was scored under
    pub profile_kind: ProfileKind,

    /// Present sections, in evaluation order
    pub sections: Vec<SectionScore>,
}

impl ScoreReport {
    /// Risk band of the final score
    pub fn band(&self) -> ScoreBand {
        ScoreBand::of(self.score)
    }

    /// Overrides that fired
    pub fn hard_overrides(&self) -> impl Iterator<Item = HardOverride> + '_ {
        self.sections.iter().filter_map(|s| s.hard_override)
    }
}

/// Risk band of a final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// 80 and above
    LowRisk,
    /// 60 to 79
    ModerateRisk,
    /// Below 60
    HighRisk,
}

impl ScoreBand {
    /// Classify a score
    pub fn of(score: u8) -> Self {
        match score {
            80.. => ScoreBand::LowRisk,
            60..=79 => ScoreBand::ModerateRisk,
            _ => ScoreBand::HighRisk,
        }
    }

    /// Get the band name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::LowRisk => "low risk",
            ScoreBand::ModerateRisk => "moderate risk",
            ScoreBand::HighRisk => "high risk",
        }
    }
}

/// Profile-specific section rules
///
/// Everything that differs between profile kinds lives behind this trait so
/// each profile's overrides sit together.
pub trait ProfileRules: Send + Sync {
    /// Profile kind these rules implement
    fn kind(&self) -> ProfileKind;

    /// Score the political exposure section
    fn political_exposure(&self, section: &PoliticalExposure) -> SectionOutcome;

    /// Score the judicial processes section
    fn judicial_processes(&self, section: &JudicialProcesses) -> SectionOutcome;
}

/// Rules for technician screening
///
/// Direct political exposure and any civil or criminal proceeding force the
/// section to zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct TechnicianRules;

impl ProfileRules for TechnicianRules {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Technician
    }

    fn political_exposure(&self, section: &PoliticalExposure) -> SectionOutcome {
        if section.is_pep {
            return SectionOutcome::overridden(HardOverride::TechnicianPoliticalExposure);
        }
        SectionOutcome::scored(linear_political_exposure(section))
    }

    fn judicial_processes(&self, section: &JudicialProcesses) -> SectionOutcome {
        let disqualified = section
            .processes
            .iter()
            .any(|p| p.is_civil() || p.is_criminal());
        if disqualified {
            return SectionOutcome::overridden(HardOverride::TechnicianCivilOrCriminalProcess);
        }

        // Labor and active penalties stack on the same process.
        let labor = section.processes.iter().filter(|p| p.is_labor()).count() as i32;
        let active = section.processes.iter().filter(|p| p.is_active()).count() as i32;

        SectionOutcome::scored(SECTION_BASE - labor * 15 - active * 5)
    }
}

/// Rules for organization due diligence; linear penalties only
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizationRules;

impl ProfileRules for OrganizationRules {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Organization
    }

    fn political_exposure(&self, section: &PoliticalExposure) -> SectionOutcome {
        SectionOutcome::scored(linear_political_exposure(section))
    }

    fn judicial_processes(&self, section: &JudicialProcesses) -> SectionOutcome {
        let mut raw = SECTION_BASE;

        for process in section.processes.iter().filter(|p| p.is_active()) {
            raw -= 5;
            if process.side == ProcessSide::Respondent {
                raw -= 5;
            }
        }

        if section.total() > 10 {
            raw -= 10;
        }

        SectionOutcome::scored(raw)
    }
}

/// Rule set for a profile kind
pub fn rules_for(kind: ProfileKind) -> &'static dyn ProfileRules {
    static TECHNICIAN: TechnicianRules = TechnicianRules;
    static ORGANIZATION: OrganizationRules = OrganizationRules;

    match kind {
        ProfileKind::Technician => &TECHNICIAN,
        ProfileKind::Organization => &ORGANIZATION,
    }
}

fn linear_political_exposure(section: &PoliticalExposure) -> i32 {
    let mut raw = SECTION_BASE;

    if section.is_pep {
        raw -= 40;
    }
    if section.related_to_pep {
        raw -= 20;
    }
    for detail in &section.details {
        raw -= match detail.level {
            ExposureLevel::High => 15,
            ExposureLevel::Medium => 10,
            ExposureLevel::Low => 5,
        };
    }

    raw
}

fn registration(section: &RegistrationData) -> SectionOutcome {
    let penalty = if section.status == RegistrationStatus::Active {
        0
    } else {
        50
    };
    SectionOutcome::scored(SECTION_BASE - penalty)
}

fn ownership(shareholder_count: usize) -> SectionOutcome {
    let penalty = if shareholder_count > 10 { 10 } else { 0 };
    SectionOutcome::scored(SECTION_BASE - penalty)
}

fn participations(section: &Participations) -> SectionOutcome {
    let inactive = section.entities.iter().filter(|e| !e.is_active()).count() as i32;
    SectionOutcome::scored(SECTION_BASE - inactive * 15)
}

fn national_sanctions(section: &Sanctions) -> SectionOutcome {
    let penalty: i32 = section
        .national
        .iter()
        .filter(|s| s.found)
        .map(|s| match s.kind.tier() {
            SanctionTier::Critical => 25,
            SanctionTier::High => 15,
            SanctionTier::Standard => 10,
        })
        .sum();
    SectionOutcome::scored(SECTION_BASE - penalty)
}

fn international_sanctions(section: &Sanctions) -> SectionOutcome {
    let hits = section.international.iter().filter(|s| s.found).count() as i32;
    SectionOutcome::scored(SECTION_BASE - hits * 30)
}

fn administrative_processes(section: &AdministrativeProcesses) -> SectionOutcome {
    let records = section.records().count() as i32;
    let fined = section.records().filter(|p| p.has_fine()).count() as i32;
    SectionOutcome::scored(SECTION_BASE - records * 10 - fined * 10)
}

/// Running weighted sum over the present sections
struct Accumulator {
    table: WeightTable,
    weighted_sum: i64,
    weight_total: i64,
    sections: Vec<SectionScore>,
}

impl Accumulator {
    fn new(weights: &WeightSet) -> Self {
        Self {
            table: weights.table(),
            weighted_sum: 0,
            weight_total: 0,
            sections: Vec::with_capacity(Category::COUNT),
        }
    }

    fn add(&mut self, category: Category, outcome: SectionOutcome) {
        let raw = outcome.raw.clamp(0, SECTION_BASE);
        let weight = self.table.get(category);

        self.weighted_sum += i64::from(raw) * i64::from(weight);
        self.weight_total += i64::from(weight);
        self.sections.push(SectionScore {
            category,
            raw_score: raw as u8,
            weight,
            hard_override: outcome.hard_override,
        });
    }

    fn finish(self, profile_kind: ProfileKind) -> ScoreReport {
        let score = if self.weight_total > 0 {
            // Round half up over non-negative integers.
            let mean = (2 * self.weighted_sum + self.weight_total) / (2 * self.weight_total);
            mean.clamp(0, 100) as u8
        } else {
            NO_EVIDENCE_SCORE
        };

        ScoreReport {
            score,
            profile_kind,
            sections: self.sections,
        }
    }
}

/// Stateless scoring engine
///
/// Holds no state, so a single engine can be shared across threads; callers
/// pass each call its own weight snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self
    }

    /// Compute the final score in `[0, 100]`
    pub fn score(
        &self,
        dossier: &ComplianceDossier,
        weights: &WeightSet,
        profile_kind: ProfileKind,
    ) -> u8 {
        self.score_report(dossier, weights, profile_kind).score
    }

    /// Compute the final score along with each section's contribution
    pub fn score_report(
        &self,
        dossier: &ComplianceDossier,
        weights: &WeightSet,
        profile_kind: ProfileKind,
    ) -> ScoreReport {
        let rules = rules_for(profile_kind);
        let mut acc = Accumulator::new(weights);

        if let Some(section) = &dossier.registration {
            acc.add(Category::Registration, registration(section));
        }
        if let Some(section) = &dossier.ownership {
            acc.add(Category::Ownership, ownership(section.shareholders.len()));
        }
        if let Some(section) = &dossier.participations {
            acc.add(Category::Participations, participations(section));
        }
        if let Some(section) = &dossier.political_exposure {
            acc.add(Category::PoliticalExposure, rules.political_exposure(section));
        }
        if let Some(section) = &dossier.sanctions {
            acc.add(Category::NationalSanctions, national_sanctions(section));
            acc.add(Category::InternationalSanctions, international_sanctions(section));
        }
        if let Some(section) = &dossier.judicial_processes {
            acc.add(Category::JudicialProcesses, rules.judicial_processes(section));
        }
        if let Some(section) = &dossier.administrative_processes {
            acc.add(
                Category::AdministrativeProcesses,
                administrative_processes(section),
            );
        }

        acc.finish(profile_kind)
    }
}
