//! Score command implementation.

use crate::cli::ScoreArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::ProfileStore;
use ddscore_domain::{ComplianceDossier, Identifier, ScoringEngine};
use std::io::Read;

/// Execute the score command.
pub fn execute_score(args: ScoreArgs, store: &ProfileStore, formatter: &Formatter) -> Result<()> {
    let contents = match args.file.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)?,
    };

    let dossier = parse_dossier(&contents)?;
    let snapshot = store.snapshot()?;

    let report = ScoringEngine::new().score_report(&dossier, &snapshot.weights, snapshot.profile_kind);
    tracing::debug!(
        "Scored dossier: profile={}, sections={}, score={}",
        report.profile_kind,
        report.sections.len(),
        report.score
    );

    let identifier = dossier.identifier.as_deref().map(display_identifier);
    println!("{}", formatter.format_score(&report, identifier.as_deref())?);

    Ok(())
}

/// Parse a dossier document.
pub fn parse_dossier(contents: &str) -> Result<ComplianceDossier> {
    Ok(serde_json::from_str(contents)?)
}

/// Show a valid identifier in its canonical mask and anything else as given.
fn display_identifier(raw: &str) -> String {
    match Identifier::parse(raw) {
        Ok(identifier) => identifier.formatted().to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dossier_rejects_bad_json() {
        assert!(parse_dossier("{ not json").is_err());
    }

    #[test]
    fn test_parse_empty_dossier() {
        assert!(parse_dossier("{}").unwrap().is_empty());
    }

    #[test]
    fn test_display_identifier() {
        assert_eq!(display_identifier("11222333000181"), "11.222.333/0001-81");
        assert_eq!(display_identifier("123"), "123");
    }
}
