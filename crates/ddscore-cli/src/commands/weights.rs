//! Weights command implementation.

use crate::cli::{WeightsAction, WeightsArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::ProfileStore;
use ddscore_domain::weights::{is_valid_weight, MAX_WEIGHT, MIN_WEIGHT};
use ddscore_domain::Category;

/// Execute the weights command.
pub fn execute_weights(args: WeightsArgs, store: &ProfileStore, formatter: &Formatter) -> Result<()> {
    match args.action {
        WeightsAction::Show => show_weights(store, formatter),
        WeightsAction::Set { category, weight } => set_weight(store, &category, weight, formatter),
        WeightsAction::Reset => reset_weights(store, formatter),
    }
}

fn show_weights(store: &ProfileStore, formatter: &Formatter) -> Result<()> {
    let snapshot = store.snapshot()?;
    println!(
        "{}",
        formatter.format_weights(snapshot.profile_kind, &snapshot.weights)?
    );
    Ok(())
}

/// Parse and range-check a weight edit.
pub fn parse_weight_edit(category: &str, weight: u8) -> Result<(Category, u8)> {
    let category = Category::parse(category).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        CliError::InvalidInput(format!(
            "Unknown category '{}' (expected one of: {})",
            category,
            known.join(", ")
        ))
    })?;

    if !is_valid_weight(weight) {
        return Err(CliError::InvalidInput(format!(
            "Weight must be between {} and {}",
            MIN_WEIGHT, MAX_WEIGHT
        )));
    }

    Ok((category, weight))
}

fn set_weight(store: &ProfileStore, category: &str, weight: u8, formatter: &Formatter) -> Result<()> {
    let (category, weight) = parse_weight_edit(category, weight)?;
    store.update_weight(category, weight)?;

    println!(
        "{}",
        formatter.success(&format!("Set {} to {}", category.label(), weight))
    );
    Ok(())
}

fn reset_weights(store: &ProfileStore, formatter: &Formatter) -> Result<()> {
    store.reset_weights()?;
    let kind = store.active_profile_kind()?;
    println!(
        "{}",
        formatter.success(&format!("Restored default weights for profile '{}'", kind))
    );
    Ok(())
}
