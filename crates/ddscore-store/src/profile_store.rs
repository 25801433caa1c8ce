//! Weight profile store - active profile, weights and presets
//!
//! All state lives behind one mutex together with the repository. Each
//! mutation builds the next state, persists it, and only then swaps it in,
//! so a failed write leaves the in-memory state untouched and readers never
//! see half of an update.

use crate::StoreError;
use ddscore_domain::{Category, PresetId, ProfileKind, ProfileRepository, RulePreset, WeightSet};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Active configuration read in one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSnapshot {
    /// Active profile kind
    pub profile_kind: ProfileKind,

    /// Active weight set
    pub weights: WeightSet,

    /// Preset the configuration was loaded from, if any
    pub selected_preset: Option<PresetId>,
}

struct Inner<R> {
    repo: R,
    kind: ProfileKind,
    weights: WeightSet,
    presets: Vec<RulePreset>,
    selected: Option<PresetId>,
}

impl<R> Inner<R> {
    fn find_preset(&self, id: PresetId) -> Option<&RulePreset> {
        self.presets.iter().find(|p| p.id == id)
    }
}

/// Holds the two rule profiles and the user's saved presets
///
/// # Examples
///
/// ```
/// use ddscore_domain::{Category, ProfileKind};
/// use ddscore_store::{MemoryRepository, WeightProfileStore};
///
/// let store = WeightProfileStore::open(MemoryRepository::new()).unwrap();
/// store.set_profile_kind(ProfileKind::Technician).unwrap();
/// store.update_weight(Category::Ownership, 1).unwrap();
///
/// let weights = store.active_weights().unwrap();
/// assert_eq!(weights.weight_of(Category::Ownership), Some(1));
/// ```
pub struct WeightProfileStore<R> {
    inner: Mutex<Inner<R>>,
}

impl<R> WeightProfileStore<R>
where
    R: ProfileRepository<Error = StoreError>,
{
    /// Open a store over a repository
    ///
    /// Restores the persisted active kind (Organization when none), its
    /// weight set (built-in defaults when none), the preset log and the
    /// selected preset. A selected marker pointing at a missing preset is
    /// dropped.
    pub fn open(mut repo: R) -> Result<Self, StoreError> {
        let kind = repo.load_active_kind()?.unwrap_or_default();
        let weights = match repo.load_weights(kind)? {
            Some(weights) => weights,
            None => kind.default_weights(),
        };
        let presets = repo.load_presets()?;
        let selected = repo
            .load_selected_preset()?
            .filter(|id| presets.iter().any(|p| p.id == *id));

        debug!(
            "Opened profile store: kind={}, presets={}, selected={:?}",
            kind,
            presets.len(),
            selected.map(|id| id.to_string())
        );

        Ok(Self {
            inner: Mutex::new(Inner {
                repo,
                kind,
                weights,
                presets,
                selected,
            }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner<R>>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Active weight set
    pub fn active_weights(&self) -> Result<WeightSet, StoreError> {
        Ok(self.lock()?.weights.clone())
    }

    /// Active profile kind
    pub fn active_profile_kind(&self) -> Result<ProfileKind, StoreError> {
        Ok(self.lock()?.kind)
    }

    /// Kind, weights and selection read under one lock
    pub fn snapshot(&self) -> Result<ProfileSnapshot, StoreError> {
        let inner = self.lock()?;
        Ok(ProfileSnapshot {
            profile_kind: inner.kind,
            weights: inner.weights.clone(),
            selected_preset: inner.selected,
        })
    }

    /// Saved presets, oldest first
    pub fn presets(&self) -> Result<Vec<RulePreset>, StoreError> {
        Ok(self.lock()?.presets.clone())
    }

    /// Currently selected preset
    pub fn selected_preset(&self) -> Result<Option<PresetId>, StoreError> {
        Ok(self.lock()?.selected)
    }

    /// Switch the active profile kind
    ///
    /// Loads the kind's persisted weights, seeding and persisting the
    /// built-in defaults the first time, and deselects any preset.
    pub fn set_profile_kind(&self, kind: ProfileKind) -> Result<(), StoreError> {
        let mut inner = self.lock()?;

        let (weights, seeded) = match inner.repo.load_weights(kind)? {
            Some(weights) => (weights, false),
            None => (kind.default_weights(), true),
        };
        inner
            .repo
            .save_activation(kind, seeded.then_some(&weights), None)?;

        info!("Switched profile: {} -> {}", inner.kind, kind);

        inner.kind = kind;
        inner.weights = weights;
        inner.selected = None;
        Ok(())
    }

    /// Change one weight of the active set
    ///
    /// The value is stored as given; range checks belong to the caller.
    pub fn update_weight(&self, category: Category, weight: u8) -> Result<(), StoreError> {
        let mut inner = self.lock()?;

        let mut weights = inner.weights.clone();
        weights.set_weight(category, weight);
        let kind = inner.kind;
        inner.repo.save_weights(kind, &weights)?;

        debug!("Updated weight: profile={}, {}={}", kind, category, weight);

        inner.weights = weights;
        Ok(())
    }

    /// Restore the active profile's built-in defaults
    pub fn reset_weights(&self) -> Result<(), StoreError> {
        let mut inner = self.lock()?;

        let kind = inner.kind;
        let defaults = kind.default_weights();
        inner.repo.save_weights(kind, &defaults)?;

        info!("Reset weights to defaults for profile {}", kind);

        inner.weights = defaults;
        Ok(())
    }

    /// Snapshot the active configuration into a new preset
    ///
    /// Returns `None` without saving when the trimmed name is empty.
    pub fn save_preset(&self, name: &str) -> Result<Option<RulePreset>, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            debug!("Ignoring preset with empty name");
            return Ok(None);
        }

        let mut inner = self.lock()?;

        let preset = RulePreset::capture(name, inner.kind, inner.weights.clone());
        inner.repo.insert_preset(&preset)?;

        info!(
            "Saved preset '{}' ({}) for profile {}",
            preset.name, preset.id, preset.profile_kind
        );

        inner.presets.push(preset.clone());
        Ok(Some(preset))
    }

    /// Make a preset's kind and weights the active configuration
    ///
    /// Returns `false` and changes nothing when the id is unknown.
    pub fn load_preset(&self, id: PresetId) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;

        let Some(preset) = inner.find_preset(id).cloned() else {
            debug!("Ignoring load of unknown preset {}", id);
            return Ok(false);
        };

        inner
            .repo
            .save_activation(preset.profile_kind, Some(&preset.weights), Some(id))?;

        info!(
            "Loaded preset '{}' ({}): profile {}",
            preset.name, id, preset.profile_kind
        );

        inner.kind = preset.profile_kind;
        inner.weights = preset.weights;
        inner.selected = Some(id);
        Ok(true)
    }

    /// Delete a preset
    ///
    /// Clears the selection if it pointed at the preset. Returns `false`
    /// when the id is unknown.
    pub fn delete_preset(&self, id: PresetId) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;

        if inner.find_preset(id).is_none() {
            debug!("Ignoring delete of unknown preset {}", id);
            return Ok(false);
        }

        inner.repo.delete_preset(id)?;

        info!("Deleted preset {}", id);

        inner.presets.retain(|p| p.id != id);
        if inner.selected == Some(id) {
            inner.selected = None;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryRepository;

    fn open() -> WeightProfileStore<MemoryRepository> {
        WeightProfileStore::open(MemoryRepository::new()).unwrap()
    }

    /// Memory repository whose activation writes can be made to fail
    #[derive(Default)]
    struct FlakyRepository {
        inner: MemoryRepository,
        fail_activation: bool,
    }

    impl ProfileRepository for FlakyRepository {
        type Error = StoreError;

        fn load_active_kind(&mut self) -> Result<Option<ProfileKind>, StoreError> {
            self.inner.load_active_kind()
        }

        fn load_weights(&mut self, kind: ProfileKind) -> Result<Option<WeightSet>, StoreError> {
            self.inner.load_weights(kind)
        }

        fn save_weights(&mut self, kind: ProfileKind, weights: &WeightSet) -> Result<(), StoreError> {
            self.inner.save_weights(kind, weights)
        }

        fn load_presets(&mut self) -> Result<Vec<RulePreset>, StoreError> {
            self.inner.load_presets()
        }

        fn insert_preset(&mut self, preset: &RulePreset) -> Result<(), StoreError> {
            self.inner.insert_preset(preset)
        }

        fn delete_preset(&mut self, id: PresetId) -> Result<bool, StoreError> {
            self.inner.delete_preset(id)
        }

        fn load_selected_preset(&mut self) -> Result<Option<PresetId>, StoreError> {
            self.inner.load_selected_preset()
        }

        fn save_activation(
            &mut self,
            kind: ProfileKind,
            weights: Option<&WeightSet>,
            selected: Option<PresetId>,
        ) -> Result<(), StoreError> {
            if self.fail_activation {
                return Err(StoreError::InvalidData("disk full".to_string()));
            }
            self.inner.save_activation(kind, weights, selected)
        }
    }

    #[test]
    fn test_open_defaults_to_organization() {
        let store = open();
        assert_eq!(store.active_profile_kind().unwrap(), ProfileKind::Organization);
        assert_eq!(
            store.active_weights().unwrap(),
            ProfileKind::Organization.default_weights()
        );
        assert!(store.presets().unwrap().is_empty());
        assert_eq!(store.selected_preset().unwrap(), None);
    }

    #[test]
    fn test_update_then_reset_restores_defaults() {
        let store = open();
        store.update_weight(Category::Registration, 1).unwrap();
        store.update_weight(Category::JudicialProcesses, 2).unwrap();
        assert_eq!(
            store.active_weights().unwrap().weight_of(Category::Registration),
            Some(1)
        );

        store.reset_weights().unwrap();
        assert_eq!(
            store.active_weights().unwrap(),
            ProfileKind::Organization.default_weights()
        );
    }

    #[test]
    fn test_update_changes_only_one_category() {
        let store = open();
        let before = store.active_weights().unwrap();
        store.update_weight(Category::Ownership, 3).unwrap();
        let after = store.active_weights().unwrap();

        for category in Category::ALL {
            if category == Category::Ownership {
                assert_eq!(after.weight_of(category), Some(3));
            } else {
                assert_eq!(after.weight_of(category), before.weight_of(category));
            }
        }
    }

    #[test]
    fn test_profiles_keep_separate_weights() {
        let store = open();
        store.update_weight(Category::Ownership, 1).unwrap();

        store.set_profile_kind(ProfileKind::Technician).unwrap();
        assert_eq!(
            store.active_weights().unwrap(),
            ProfileKind::Technician.default_weights()
        );
        store.update_weight(Category::Ownership, 9).unwrap();

        store.set_profile_kind(ProfileKind::Organization).unwrap();
        assert_eq!(
            store.active_weights().unwrap().weight_of(Category::Ownership),
            Some(1)
        );
    }

    #[test]
    fn test_save_then_load_preset_restores_configuration() {
        let store = open();
        store.set_profile_kind(ProfileKind::Technician).unwrap();
        store.update_weight(Category::PoliticalExposure, 4).unwrap();
        let saved = store.snapshot().unwrap();

        let preset = store.save_preset("  field team  ").unwrap().unwrap();
        assert_eq!(preset.name, "field team");

        store.set_profile_kind(ProfileKind::Organization).unwrap();
        store.update_weight(Category::PoliticalExposure, 10).unwrap();

        assert!(store.load_preset(preset.id).unwrap());
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.profile_kind, saved.profile_kind);
        assert_eq!(snapshot.weights, saved.weights);
        assert_eq!(snapshot.selected_preset, Some(preset.id));
    }

    #[test]
    fn test_empty_preset_name_is_noop() {
        let store = open();
        assert!(store.save_preset("").unwrap().is_none());
        assert!(store.save_preset("   ").unwrap().is_none());
        assert!(store.presets().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_preset_ids_are_noops() {
        let store = open();
        let before = store.snapshot().unwrap();
        assert!(!store.load_preset(PresetId::new()).unwrap());
        assert!(!store.delete_preset(PresetId::new()).unwrap());
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn test_delete_selected_preset_clears_selection() {
        let store = open();
        let keep = store.save_preset("keep").unwrap().unwrap();
        let doomed = store.save_preset("doomed").unwrap().unwrap();

        store.load_preset(doomed.id).unwrap();
        assert!(store.delete_preset(doomed.id).unwrap());

        assert_eq!(store.selected_preset().unwrap(), None);
        let presets = store.presets().unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].id, keep.id);
    }

    #[test]
    fn test_profile_switch_clears_selection() {
        let store = open();
        let preset = store.save_preset("p").unwrap().unwrap();
        store.load_preset(preset.id).unwrap();

        store.set_profile_kind(ProfileKind::Technician).unwrap();
        assert_eq!(store.selected_preset().unwrap(), None);
    }

    #[test]
    fn test_reopen_restores_state() {
        let store = open();
        store.set_profile_kind(ProfileKind::Technician).unwrap();
        store.update_weight(Category::Registration, 2).unwrap();
        let preset = store.save_preset("p").unwrap().unwrap();
        store.load_preset(preset.id).unwrap();
        let expected = store.snapshot().unwrap();

        let repo = store.inner.into_inner().unwrap().repo;
        let reopened = WeightProfileStore::open(repo).unwrap();
        assert_eq!(reopened.snapshot().unwrap(), expected);
        assert_eq!(reopened.presets().unwrap(), vec![preset]);
    }

    #[test]
    fn test_failed_switch_leaves_state_and_repository_untouched() {
        let store = WeightProfileStore::open(FlakyRepository::default()).unwrap();
        let preset = store.save_preset("p").unwrap().unwrap();
        store.load_preset(preset.id).unwrap();
        let before = store.snapshot().unwrap();

        store.lock().unwrap().repo.fail_activation = true;
        assert!(store.set_profile_kind(ProfileKind::Technician).is_err());
        assert_eq!(store.snapshot().unwrap(), before);

        let mut inner = store.inner.into_inner().unwrap();
        assert_eq!(inner.repo.load_weights(ProfileKind::Technician).unwrap(), None);
        assert_eq!(
            inner.repo.load_active_kind().unwrap(),
            Some(ProfileKind::Organization)
        );
        assert_eq!(inner.repo.load_selected_preset().unwrap(), Some(preset.id));
    }

    #[test]
    fn test_failed_preset_load_leaves_state_and_repository_untouched() {
        let store = WeightProfileStore::open(FlakyRepository::default()).unwrap();
        store.set_profile_kind(ProfileKind::Technician).unwrap();
        let preset = store.save_preset("tech").unwrap().unwrap();
        store.set_profile_kind(ProfileKind::Organization).unwrap();
        store.update_weight(Category::Ownership, 2).unwrap();
        let before = store.snapshot().unwrap();

        store.lock().unwrap().repo.fail_activation = true;
        assert!(store.load_preset(preset.id).is_err());
        assert_eq!(store.snapshot().unwrap(), before);

        let mut inner = store.inner.into_inner().unwrap();
        assert_eq!(
            inner.repo.load_active_kind().unwrap(),
            Some(ProfileKind::Organization)
        );
        assert_eq!(inner.repo.load_selected_preset().unwrap(), None);
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        let store = std::sync::Arc::new(open());
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.update_weight(Category::Ownership, i + 1).unwrap();
                    store.snapshot().unwrap()
                })
            })
            .collect();

        for handle in handles {
            let snapshot = handle.join().unwrap();
            assert_eq!(snapshot.weights.len(), Category::COUNT);
        }
    }
}
