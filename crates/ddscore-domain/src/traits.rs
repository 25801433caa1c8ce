//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{PresetId, ProfileKind, RulePreset, WeightSet};

/// Trait for persisting weight profile state
///
/// Implemented by the infrastructure layer (ddscore-store). Every load
/// returns `Ok(None)` (or an empty list) when nothing was saved yet; the
/// caller decides the defaults.
pub trait ProfileRepository {
    /// Error type for repository operations
    type Error;

    /// Load the active profile kind
    fn load_active_kind(&mut self) -> Result<Option<ProfileKind>, Self::Error>;


    /// Load the weight set persisted for a profile kind
    fn load_weights(&mut self, kind: ProfileKind) -> Result<Option<WeightSet>, Self::Error>;

    /// Replace the weight set persisted for a profile kind
    fn save_weights(&mut self, kind: ProfileKind, weights: &WeightSet)
        -> Result<(), Self::Error>;

    /// Load every preset, oldest first
    fn load_presets(&mut self) -> Result<Vec<RulePreset>, Self::Error>;

    /// Insert a new preset
    fn insert_preset(&mut self, preset: &RulePreset) -> Result<(), Self::Error>;

    /// Delete a preset, returning whether it existed
    ///
    /// A selection pointing at the preset is cleared in the same commit.
    fn delete_preset(&mut self, id: PresetId) -> Result<bool, Self::Error>;

    /// Load the selected preset id
    fn load_selected_preset(&mut self) -> Result<Option<PresetId>, Self::Error>;

    /// Make `kind` active and record the selected preset in one commit
    ///
    /// When `weights` is given it replaces the kind's persisted weight set
    /// as part of the same commit. Either everything lands or nothing does.
    fn save_activation(
        &mut self,
        kind: ProfileKind,
        weights: Option<&WeightSet>,
        selected: Option<PresetId>,
    ) -> Result<(), Self::Error>;
}

impl<R: ProfileRepository + ?Sized> ProfileRepository for Box<R> {
    type Error = R::Error;

    fn load_active_kind(&mut self) -> Result<Option<ProfileKind>, Self::Error> {
        (**self).load_active_kind()
    }

    fn load_weights(&mut self, kind: ProfileKind) -> Result<Option<WeightSet>, Self::Error> {
        (**self).load_weights(kind)
    }

    fn save_weights(&mut self, kind: ProfileKind, weights: &WeightSet)
        -> Result<(), Self::Error> {
        (**self).save_weights(kind, weights)
    }

    fn load_presets(&mut self) -> Result<Vec<RulePreset>, Self::Error> {
        (**self).load_presets()
    }

    fn insert_preset(&mut self, preset: &RulePreset) -> Result<(), Self::Error> {
        (**self).insert_preset(preset)
    }

    fn delete_preset(&mut self, id: PresetId) -> Result<bool, Self::Error> {
        (**self).delete_preset(id)
    }

    fn load_selected_preset(&mut self) -> Result<Option<PresetId>, Self::Error> {
        (**self).load_selected_preset()
    }

    fn save_activation(
        &mut self,
        kind: ProfileKind,
        weights: Option<&WeightSet>,
        selected: Option<PresetId>,
    ) -> Result<(), Self::Error> {
        (**self).save_activation(kind, weights, selected)
    }
}
