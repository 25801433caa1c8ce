//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use crate::ProfileStore;
use ddscore_domain::ProfileKind;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, store: &ProfileStore, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::Show => show_active_profile(store, formatter),
        ProfileAction::Switch { kind } => switch_profile(store, kind.into(), formatter),
    }
}

/// Show the active profile.
fn show_active_profile(store: &ProfileStore, formatter: &Formatter) -> Result<()> {
    let snapshot = store.snapshot()?;
    let preset = match snapshot.selected_preset {
        Some(id) => store.presets()?.into_iter().find(|p| p.id == id),
        None => None,
    };

    match formatter.output_format() {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "profile_kind": snapshot.profile_kind,
                "selected_preset": preset.as_ref().map(|p| serde_json::json!({
                    "id": p.id,
                    "name": p.name,
                })),
            }))?
        ),
        OutputFormat::Quiet => println!("{}", snapshot.profile_kind),
        OutputFormat::Table => {
            println!(
                "Active profile: {}",
                formatter.success(snapshot.profile_kind.as_str())
            );
            match preset {
                Some(preset) => println!("  Preset: {} ({})", preset.name, preset.id),
                None => println!("  Preset: none"),
            }
        }
    }

    Ok(())
}

/// Switch to a different profile.
fn switch_profile(store: &ProfileStore, kind: ProfileKind, formatter: &Formatter) -> Result<()> {
    store.set_profile_kind(kind)?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", kind))
    );
    Ok(())
}
