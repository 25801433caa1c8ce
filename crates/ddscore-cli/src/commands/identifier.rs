//! Identifier command implementations.

use crate::cli::{FormatArgs, ValidateArgs};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use ddscore_domain::identifier;

/// Execute the validate command.
///
/// Returns whether every identifier was valid, so the caller can pick an
/// exit status.
pub fn execute_validate(args: ValidateArgs, formatter: &Formatter) -> Result<bool> {
    let results: Vec<_> = args
        .identifiers
        .into_iter()
        .map(|input| {
            let outcome = identifier::validate(&input);
            (input, outcome)
        })
        .collect();

    let all_valid = results.iter().all(|(_, outcome)| outcome.valid);
    println!("{}", formatter.format_validations(&results)?);

    Ok(all_valid)
}

/// Execute the format command.
pub fn execute_format(args: FormatArgs, formatter: &Formatter) -> Result<()> {
    let formatted = identifier::format(&args.identifier);

    match formatter.output_format() {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "input": args.identifier,
                "formatted": formatted,
                "kind": identifier::detect_kind(&args.identifier),
            }))?
        ),
        OutputFormat::Table | OutputFormat::Quiet => println!("{}", formatted),
    }

    Ok(())
}
