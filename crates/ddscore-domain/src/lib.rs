//! ddscore Domain Layer
//!
//! This crate contains the core business logic for due-diligence scoring.
//! It performs no I/O and defines the value objects and trait interfaces the
//! store and CLI layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Identifier**: an 11-digit individual or 14-digit organization number,
//!   validated with Módulo 11 check digits
//! - **Profile kind**: Technician or Organization; selects rules and weights
//! - **Weight set**: one weight in `[1, 10]` per dossier category
//! - **Preset**: a named snapshot of a profile kind and its weight set
//! - **Dossier**: structured due-diligence input, every section optional
//! - **Scoring engine**: reduces a dossier to a score in `[0, 100]`
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Persistence lives behind [`traits::ProfileRepository`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod dossier;
pub mod identifier;
pub mod preset;
pub mod profile;
pub mod scoring;
pub mod traits;
pub mod weights;

// Re-exports for convenience
pub use category::{Category, WeightLevel};
pub use dossier::ComplianceDossier;
pub use identifier::{Identifier, IdentifierKind, ValidationOutcome};
pub use preset::{PresetId, RulePreset};
pub use profile::ProfileKind;
pub use scoring::{HardOverride, ScoreBand, ScoreReport, ScoringEngine, SectionScore};
pub use traits::ProfileRepository;
pub use weights::{CategoryWeight, WeightSet, WeightTable};
