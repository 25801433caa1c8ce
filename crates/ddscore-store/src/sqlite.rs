//! SQLite implementation of [`ProfileRepository`]

use crate::StoreError;
use ddscore_domain::preset::now_millis;
use ddscore_domain::{
    Category, CategoryWeight, PresetId, ProfileKind, ProfileRepository, RulePreset, WeightSet,
};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::path::Path;

const ACTIVE_KIND_KEY: &str = "active_profile_kind";
const SELECTED_PRESET_KEY: &str = "selected_preset";

/// SQLite-based implementation of ProfileRepository
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a repository across threads
/// by wrapping it in a [`WeightProfileStore`](crate::WeightProfileStore).
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open (or create) a repository at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ddscore_store::SqliteRepository;
    ///
    /// let repo = SqliteRepository::new("ddscore.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut repo = Self { conn };
        repo.initialize_schema()?;
        Ok(repo)
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    fn preset_id_to_bytes(id: PresetId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    fn bytes_to_preset_id(bytes: &[u8]) -> Result<PresetId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!(
                "Expected 16 bytes for PresetId, got {}",
                bytes.len()
            ))
        })?;
        Ok(PresetId::from_value(u128::from_be_bytes(arr)))
    }

    fn str_to_profile_kind(s: &str) -> Result<ProfileKind, StoreError> {
        ProfileKind::parse(s)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown profile kind: {}", s)))
    }

    fn str_to_category(s: &str) -> Result<Category, StoreError> {
        Category::parse(s)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown category: {}", s)))
    }

    /// Map a weight row `(category, weight, description)`
    fn weight_from_row(row: &Row<'_>) -> rusqlite::Result<CategoryWeight> {
        let category: String = row.get(0)?;
        let category = Self::str_to_category(&category).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(CategoryWeight::new(category, row.get(1)?, row.get::<_, String>(2)?))
    }

    fn load_preset_weights(&self, id_bytes: &[u8]) -> Result<WeightSet, StoreError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT category, weight, description FROM preset_weights
             WHERE preset_id = ?1 ORDER BY position",
        )?;
        let entries = stmt
            .query_map(params![id_bytes], Self::weight_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(WeightSet::new(entries))
    }

    fn write_weights(
        tx: &Transaction<'_>,
        kind: ProfileKind,
        weights: &WeightSet,
    ) -> Result<(), StoreError> {
        tx.execute(
            "INSERT INTO weight_profiles (profile_kind, updated_at) VALUES (?1, ?2)
             ON CONFLICT(profile_kind) DO UPDATE SET updated_at = excluded.updated_at",
            params![kind.as_str(), now_millis() as i64],
        )?;
        tx.execute(
            "DELETE FROM profile_weights WHERE profile_kind = ?1",
            params![kind.as_str()],
        )?;

        let mut stmt = tx.prepare(
            "INSERT INTO profile_weights (profile_kind, position, category, weight, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (position, entry) in weights.entries().iter().enumerate() {
            stmt.execute(params![
                kind.as_str(),
                position as i64,
                entry.category.as_str(),
                entry.weight,
                &entry.description,
            ])?;
        }
        Ok(())
    }

    fn write_selected(tx: &Transaction<'_>, id: Option<PresetId>) -> Result<(), StoreError> {
        match id {
            Some(id) => {
                tx.execute(
                    "INSERT INTO settings (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    params![SELECTED_PRESET_KEY, Self::preset_id_to_bytes(id)],
                )?;
            }
            None => {
                tx.execute(
                    "DELETE FROM settings WHERE key = ?1",
                    params![SELECTED_PRESET_KEY],
                )?;
            }
        }
        Ok(())
    }
}

impl ProfileRepository for SqliteRepository {
    type Error = StoreError;

    fn load_active_kind(&mut self) -> Result<Option<ProfileKind>, Self::Error> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![ACTIVE_KIND_KEY],
                |row| row.get(0),
            )
            .optional()?;

        value.as_deref().map(Self::str_to_profile_kind).transpose()
    }

    fn load_weights(&mut self, kind: ProfileKind) -> Result<Option<WeightSet>, Self::Error> {
        let persisted = self
            .conn
            .query_row(
                "SELECT 1 FROM weight_profiles WHERE profile_kind = ?1",
                params![kind.as_str()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if !persisted {
            return Ok(None);
        }

        let mut stmt = self.conn.prepare_cached(
            "SELECT category, weight, description FROM profile_weights
             WHERE profile_kind = ?1 ORDER BY position",
        )?;
        let entries = stmt
            .query_map(params![kind.as_str()], Self::weight_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(WeightSet::new(entries)))
    }

    fn save_weights(&mut self, kind: ProfileKind, weights: &WeightSet) -> Result<(), Self::Error> {
        let tx = self.conn.transaction()?;
        Self::write_weights(&tx, kind, weights)?;
        tx.commit()?;
        Ok(())
    }

    fn load_presets(&mut self) -> Result<Vec<RulePreset>, Self::Error> {
        let rows = {
            let mut stmt = self.conn.prepare(
                "SELECT id, name, profile_kind, created_at FROM presets
                 ORDER BY created_at, id",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, Vec<u8>>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        rows.into_iter()
            .map(|(id_bytes, name, kind, created_at)| {
                Ok(RulePreset {
                    id: Self::bytes_to_preset_id(&id_bytes)?,
                    name,
                    profile_kind: Self::str_to_profile_kind(&kind)?,
                    weights: self.load_preset_weights(&id_bytes)?,
                    created_at: created_at as u64,
                })
            })
            .collect()
    }

    fn insert_preset(&mut self, preset: &RulePreset) -> Result<(), Self::Error> {
        let id_bytes = Self::preset_id_to_bytes(preset.id);
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO presets (id, name, profile_kind, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                &id_bytes,
                &preset.name,
                preset.profile_kind.as_str(),
                preset.created_at as i64,
            ],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO preset_weights (preset_id, position, category, weight, description)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, entry) in preset.weights.entries().iter().enumerate() {
                stmt.execute(params![
                    &id_bytes,
                    position as i64,
                    entry.category.as_str(),
                    entry.weight,
                    &entry.description,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_preset(&mut self, id: PresetId) -> Result<bool, Self::Error> {
        let id_bytes = Self::preset_id_to_bytes(id);
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM preset_weights WHERE preset_id = ?1",
            params![&id_bytes],
        )?;
        let deleted = tx.execute("DELETE FROM presets WHERE id = ?1", params![&id_bytes])?;
        tx.execute(
            "DELETE FROM settings WHERE key = ?1 AND value = ?2",
            params![SELECTED_PRESET_KEY, &id_bytes],
        )?;

        tx.commit()?;
        Ok(deleted > 0)
    }

    fn load_selected_preset(&mut self) -> Result<Option<PresetId>, Self::Error> {
        let value: Option<Vec<u8>> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![SELECTED_PRESET_KEY],
                |row| row.get(0),
            )
            .optional()?;

        value.as_deref().map(Self::bytes_to_preset_id).transpose()
    }

    fn save_activation(
        &mut self,
        kind: ProfileKind,
        weights: Option<&WeightSet>,
        selected: Option<PresetId>,
    ) -> Result<(), Self::Error> {
        let tx = self.conn.transaction()?;

        if let Some(weights) = weights {
            Self::write_weights(&tx, kind, weights)?;
        }
        tx.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![ACTIVE_KIND_KEY, kind.as_str()],
        )?;
        Self::write_selected(&tx, selected)?;

        tx.commit()?;
        Ok(())
    }
}
