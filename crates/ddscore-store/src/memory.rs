//! In-process implementation of [`ProfileRepository`]

use crate::StoreError;
use ddscore_domain::{PresetId, ProfileKind, ProfileRepository, RulePreset, WeightSet};
use std::collections::HashMap;

/// Repository that keeps everything in memory
///
/// Nothing survives the process; used for tests and `--ephemeral` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    active_kind: Option<ProfileKind>,
    weights: HashMap<ProfileKind, WeightSet>,
    presets: Vec<RulePreset>,
    selected: Option<PresetId>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileRepository for MemoryRepository {
    type Error = StoreError;

    fn load_active_kind(&mut self) -> Result<Option<ProfileKind>, Self::Error> {
        Ok(self.active_kind)
    }

    fn load_weights(&mut self, kind: ProfileKind) -> Result<Option<WeightSet>, Self::Error> {
        Ok(self.weights.get(&kind).cloned())
    }

    fn save_weights(&mut self, kind: ProfileKind, weights: &WeightSet) -> Result<(), Self::Error> {
        self.weights.insert(kind, weights.clone());
        Ok(())
    }

    fn load_presets(&mut self) -> Result<Vec<RulePreset>, Self::Error> {
        Ok(self.presets.clone())
    }

    fn insert_preset(&mut self, preset: &RulePreset) -> Result<(), Self::Error> {
        if self.presets.iter().any(|p| p.id == preset.id) {
            return Err(StoreError::InvalidData(format!(
                "Duplicate preset id: {}",
                preset.id
            )));
        }
        self.presets.push(preset.clone());
        Ok(())
    }

    fn delete_preset(&mut self, id: PresetId) -> Result<bool, Self::Error> {
        let before = self.presets.len();
        self.presets.retain(|p| p.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(self.presets.len() != before)
    }

    fn load_selected_preset(&mut self) -> Result<Option<PresetId>, Self::Error> {
        Ok(self.selected)
    }

    fn save_activation(
        &mut self,
        kind: ProfileKind,
        weights: Option<&WeightSet>,
        selected: Option<PresetId>,
    ) -> Result<(), Self::Error> {
        if let Some(weights) = weights {
            self.weights.insert(kind, weights.clone());
        }
        self.active_kind = Some(kind);
        self.selected = selected;
        Ok(())
    }
}
