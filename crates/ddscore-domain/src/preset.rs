//! Preset module - named snapshots of a weight configuration

use crate::profile::ProfileKind;
use crate::weights::WeightSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a preset based on UUIDv7
///
/// UUIDv7 keeps presets sortable by creation time without a separate counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PresetId(u128);

impl PresetId {
    /// Generate a new UUIDv7-based PresetId
    ///
    /// # Examples
    ///
    /// ```
    /// use ddscore_domain::PresetId;
    ///
    /// let id = PresetId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a PresetId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a PresetId from its UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid preset id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for PresetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl std::str::FromStr for PresetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl Serialize for PresetId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PresetId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// A saved weight configuration for one profile kind
///
/// Presets are immutable once created; they can only be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePreset {
    /// Unique identifier
    pub id: PresetId,

    /// User-supplied name
    pub name: String,

    /// Profile kind captured at save time
    pub profile_kind: ProfileKind,

    /// Weight set captured at save time
    pub weights: WeightSet,

    /// Creation time (milliseconds since Unix epoch)
    pub created_at: u64,
}

impl RulePreset {
    /// Snapshot a configuration under a fresh id and the current time
    pub fn capture(name: impl Into<String>, profile_kind: ProfileKind, weights: WeightSet) -> Self {
        Self {
            id: PresetId::new(),
            name: name.into(),
            profile_kind,
            weights,
            created_at: now_millis(),
        }
    }
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_id_display_and_parse() {
        let id = PresetId::new();
        let id_str = id.to_string();
        assert_eq!(id_str.len(), 36);
        assert_eq!(PresetId::from_string(&id_str).unwrap(), id);
        assert!(PresetId::from_string("not-an-id").is_err());
    }

    #[test]
    fn test_capture_snapshots_weights() {
        let weights = ProfileKind::Technician.default_weights();
        let preset = RulePreset::capture("field team", ProfileKind::Technician, weights.clone());
        assert_eq!(preset.name, "field team");
        assert_eq!(preset.profile_kind, ProfileKind::Technician);
        assert_eq!(preset.weights, weights);
        assert!(preset.created_at > 0);
    }

    #[test]
    fn test_preset_json_round_trip() {
        let preset = RulePreset::capture("x", ProfileKind::Organization, WeightSet::default());
        let json = serde_json::to_string(&preset).unwrap();
        let back: RulePreset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, preset);
    }
}
