//! Preset command implementation.

use crate::cli::{PresetAction, PresetArgs};
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::ProfileStore;
use ddscore_domain::{PresetId, RulePreset};

/// Execute the preset command.
pub fn execute_preset(args: PresetArgs, store: &ProfileStore, formatter: &Formatter) -> Result<()> {
    match args.action {
        PresetAction::List => list_presets(store, formatter),
        PresetAction::Save { name } => save_preset(store, &name, formatter),
        PresetAction::Load { preset } => load_preset(store, &preset, formatter),
        PresetAction::Delete { preset } => delete_preset(store, &preset, formatter),
    }
}

fn list_presets(store: &ProfileStore, formatter: &Formatter) -> Result<()> {
    let presets = store.presets()?;
    let selected = store.selected_preset()?;
    println!("{}", formatter.format_presets(&presets, selected)?);
    Ok(())
}

fn save_preset(store: &ProfileStore, name: &str, formatter: &Formatter) -> Result<()> {
    let Some(preset) = store.save_preset(name)? else {
        return Err(CliError::InvalidInput("Preset name must not be empty".to_string()));
    };

    match formatter.output_format() {
        OutputFormat::Quiet => println!("{}", preset.id),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&preset)?),
        OutputFormat::Table => println!(
            "{}",
            formatter.success(&format!(
                "Saved preset '{}' ({}) for profile '{}'",
                preset.name, preset.id, preset.profile_kind
            ))
        ),
    }
    Ok(())
}

fn load_preset(store: &ProfileStore, query: &str, formatter: &Formatter) -> Result<()> {
    let presets = store.presets()?;
    let Some(preset) = resolve_preset(&presets, query)? else {
        println!("{}", formatter.warning(&format!("Preset '{}' does not exist", query)));
        return Ok(());
    };

    store.load_preset(preset.id)?;
    println!(
        "{}",
        formatter.success(&format!(
            "Loaded preset '{}' (profile '{}')",
            preset.name, preset.profile_kind
        ))
    );
    Ok(())
}

fn delete_preset(store: &ProfileStore, query: &str, formatter: &Formatter) -> Result<()> {
    let presets = store.presets()?;
    let Some(preset) = resolve_preset(&presets, query)? else {
        println!("{}", formatter.warning(&format!("Preset '{}' does not exist", query)));
        return Ok(());
    };

    store.delete_preset(preset.id)?;
    println!(
        "{}",
        formatter.success(&format!("Deleted preset '{}'", preset.name))
    );
    Ok(())
}

/// Find a preset by full id, unique id prefix, or exact name.
///
/// Returns `Ok(None)` when nothing matches and an error when the query
/// matches more than one preset.
pub fn resolve_preset<'a>(presets: &'a [RulePreset], query: &str) -> Result<Option<&'a RulePreset>> {
    let query = query.trim();

    if let Ok(id) = query.parse::<PresetId>() {
        return Ok(presets.iter().find(|p| p.id == id));
    }

    let needle = query.to_lowercase();
    let matches: Vec<&RulePreset> = presets
        .iter()
        .filter(|p| p.name == query || (!needle.is_empty() && p.id.to_string().starts_with(&needle)))
        .collect();

    match matches.as_slice() {
        [] => Ok(None),
        [preset] => Ok(Some(*preset)),
        _ => Err(CliError::InvalidInput(format!(
            "'{}' matches {} presets; use the full id",
            query,
            matches.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddscore_domain::{ProfileKind, WeightSet};

    fn preset(name: &str, id: u128) -> RulePreset {
        RulePreset {
            id: PresetId::from_value(id),
            name: name.to_string(),
            profile_kind: ProfileKind::Organization,
            weights: WeightSet::default(),
            created_at: 0,
        }
    }

    #[test]
    fn test_resolve_by_full_id() {
        let presets = vec![preset("a", 1), preset("b", 2)];
        let id = presets[1].id.to_string();
        assert_eq!(resolve_preset(&presets, &id).unwrap().unwrap().name, "b");
    }

    #[test]
    fn test_resolve_by_name_and_prefix() {
        let presets = vec![
            preset("baseline", 0xaaaa_0000 << 96),
            preset("strict", 0xbbbb_0000 << 96),
        ];
        assert_eq!(resolve_preset(&presets, "strict").unwrap().unwrap().name, "strict");
        assert_eq!(resolve_preset(&presets, "AAAA").unwrap().unwrap().name, "baseline");
        assert!(resolve_preset(&presets, "missing").unwrap().is_none());
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let presets = vec![preset("one", 1), preset("two", 2)];
        assert!(resolve_preset(&presets, "0000").is_err());
    }

    #[test]
    fn test_resolve_unknown_full_id() {
        let presets = vec![preset("a", 1)];
        let other = PresetId::from_value(99).to_string();
        assert!(resolve_preset(&presets, &other).unwrap().is_none());
    }
}
