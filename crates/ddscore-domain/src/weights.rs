//! Weight module - per-category weights used by the scoring engine

use crate::category::{Category, WeightLevel};
use serde::{Deserialize, Serialize};

/// Lowest weight a category may be configured with
pub const MIN_WEIGHT: u8 = 1;

/// Highest weight a category may be configured with
pub const MAX_WEIGHT: u8 = 10;

/// Weight used for a category missing from a weight set
pub const FALLBACK_WEIGHT: u8 = 5;

/// Check whether a weight lies within `[MIN_WEIGHT, MAX_WEIGHT]`
pub fn is_valid_weight(weight: u8) -> bool {
    (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight)
}

/// Weight assigned to a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWeight {
    /// Category this weight applies to
    pub category: Category,

    /// Weight in `[1, 10]`
    pub weight: u8,

    /// What the category covers
    pub description: String,
}

impl CategoryWeight {
    /// Create a new category weight
    pub fn new(category: Category, weight: u8, description: impl Into<String>) -> Self {
        Self {
            category,
            weight,
            description: description.into(),
        }
    }

    /// Severity label of the weight
    pub fn level(&self) -> WeightLevel {
        WeightLevel::of(self.weight)
    }
}

/// Ordered collection of category weights, one entry per category
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightSet {
    entries: Vec<CategoryWeight>,
}

impl WeightSet {
    /// Build a weight set from entries
    ///
    /// Later duplicates of a category replace earlier ones, so the set keeps
    /// at most one entry per category.
    pub fn new(entries: Vec<CategoryWeight>) -> Self {
        let mut set = Self::default();
        for entry in entries {
            set.upsert(entry);
        }
        set
    }

    /// Entries in order
    pub fn entries(&self) -> &[CategoryWeight] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a category
    pub fn get(&self, category: Category) -> Option<&CategoryWeight> {
        self.entries.iter().find(|e| e.category == category)
    }

    /// Configured weight for a category, if present
    pub fn weight_of(&self, category: Category) -> Option<u8> {
        self.get(category).map(|e| e.weight)
    }

    /// Change the weight of exactly one category
    ///
    /// A category missing from the set is appended, labelled with its
    /// display name. The weight is stored as given; range checks belong to
    /// the caller.
    pub fn set_weight(&mut self, category: Category, weight: u8) {
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.weight = weight,
            None => self
                .entries
                .push(CategoryWeight::new(category, weight, category.label())),
        }
    }

    /// Whether every entry lies within `[MIN_WEIGHT, MAX_WEIGHT]`
    pub fn is_within_bounds(&self) -> bool {
        self.entries.iter().all(|e| is_valid_weight(e.weight))
    }

    /// Fixed-size lookup table indexed by category
    pub fn table(&self) -> WeightTable {
        let mut slots = [None; Category::COUNT];
        for entry in &self.entries {
            slots[entry.category.index()] = Some(entry.weight);
        }
        WeightTable { slots }
    }

    fn upsert(&mut self, entry: CategoryWeight) {
        match self.entries.iter_mut().find(|e| e.category == entry.category) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }
}

impl FromIterator<CategoryWeight> for WeightSet {
    fn from_iter<T: IntoIterator<Item = CategoryWeight>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Weight lookup indexed by [`Category`]
///
/// Missing categories resolve to [`FALLBACK_WEIGHT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightTable {
    slots: [Option<u8>; Category::COUNT],
}

impl WeightTable {
    /// Weight for a category, falling back when it is not configured
    pub fn get(&self, category: Category) -> u8 {
        self.slots[category.index()].unwrap_or(FALLBACK_WEIGHT)
    }

    /// Whether the category was explicitly configured
    pub fn is_configured(&self, category: Category) -> bool {
        self.slots[category.index()].is_some()
    }
}
