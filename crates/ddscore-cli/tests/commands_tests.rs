//! Integration tests for the ddscore command handlers
//!
//! These tests drive the commands against a temporary profile database.

use ddscore_cli::cli::{PresetAction, PresetArgs, ProfileAction, ProfileArg, ProfileArgs, WeightsAction, WeightsArgs};
use ddscore_cli::commands;
use ddscore_cli::config::OutputFormat;
use ddscore_cli::{open_store, Config, Formatter};
use ddscore_domain::{Category, ProfileKind};
use tempfile::TempDir;

fn formatter() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

#[test]
fn test_commands_persist_across_runs() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("profiles.db");
    let config = Config::default();

    {
        let store = open_store(&config, Some(db.clone()), false).unwrap();
        commands::execute_profile(
            ProfileArgs {
                action: ProfileAction::Switch {
                    kind: ProfileArg::Technician,
                },
            },
            &store,
            &formatter(),
        )
        .unwrap();
        commands::execute_weights(
            WeightsArgs {
                action: WeightsAction::Set {
                    category: "ownership".to_string(),
                    weight: 9,
                },
            },
            &store,
            &formatter(),
        )
        .unwrap();
        commands::execute_preset(
            PresetArgs {
                action: PresetAction::Save {
                    name: "heavy ownership".to_string(),
                },
            },
            &store,
            &formatter(),
        )
        .unwrap();
    }

    let store = open_store(&config, Some(db), false).unwrap();
    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.profile_kind, ProfileKind::Technician);
    assert_eq!(snapshot.weights.weight_of(Category::Ownership), Some(9));
    assert_eq!(store.presets().unwrap()[0].name, "heavy ownership");
}

#[test]
fn test_invalid_weight_is_rejected() {
    let store = open_store(&Config::default(), None, true).unwrap();
    let result = commands::execute_weights(
        WeightsArgs {
            action: WeightsAction::Set {
                category: "ownership".to_string(),
                weight: 11,
            },
        },
        &store,
        &formatter(),
    );

    assert!(result.is_err());
    assert_eq!(
        store.active_weights().unwrap(),
        ProfileKind::Organization.default_weights()
    );
}

#[test]
fn test_empty_preset_name_is_rejected() {
    let store = open_store(&Config::default(), None, true).unwrap();
    let result = commands::execute_preset(
        PresetArgs {
            action: PresetAction::Save {
                name: "   ".to_string(),
            },
        },
        &store,
        &formatter(),
    );
    assert!(result.is_err());
    assert!(store.presets().unwrap().is_empty());
}

#[test]
fn test_loading_unknown_preset_is_not_an_error() {
    let store = open_store(&Config::default(), None, true).unwrap();
    let result = commands::execute_preset(
        PresetArgs {
            action: PresetAction::Load {
                preset: "nonexistent".to_string(),
            },
        },
        &store,
        &formatter(),
    );
    assert!(result.is_ok());
    assert_eq!(store.selected_preset().unwrap(), None);
}
