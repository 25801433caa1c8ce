//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use ddscore_domain::{
    PresetId, ProfileKind, RulePreset, ScoreBand, ScoreReport, ValidationOutcome, WeightSet,
};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    /// Format validation results, one per input.
    pub fn format_validations(&self, results: &[(String, ValidationOutcome)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(input, outcome)| {
                        serde_json::json!({
                            "input": input,
                            "valid": outcome.valid,
                            "kind": outcome.kind,
                            "formatted": outcome.formatted,
                            "errors": outcome.errors,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Input", "Kind", "Formatted", "Valid", "Errors"]);

                for (input, outcome) in results {
                    let kind = outcome.kind.map(|k| k.as_str()).unwrap_or("-");
                    let valid = if outcome.valid {
                        self.colorize("yes", "green")
                    } else {
                        self.colorize("no", "red")
                    };
                    builder.push_record([
                        input.as_str(),
                        kind,
                        outcome.formatted.as_str(),
                        valid.as_str(),
                        outcome.errors.join("; ").as_str(),
                    ]);
                }

                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(results
                .iter()
                .map(|(_, outcome)| if outcome.valid { "valid" } else { "invalid" })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a weight set.
    pub fn format_weights(&self, kind: ProfileKind, weights: &WeightSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "profile_kind": kind,
                "weights": weights,
            }))?),
            OutputFormat::Table => {
                if weights.is_empty() {
                    return Ok(self.colorize("No weights configured.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Category", "Weight", "Level", "Description"]);

                for entry in weights.entries() {
                    builder.push_record([
                        entry.category.as_str(),
                        &entry.weight.to_string(),
                        entry.level().as_str(),
                        &entry.description,
                    ]);
                }

                Ok(format!(
                    "Profile: {}\n{}",
                    self.colorize(kind.as_str(), "cyan"),
                    self.render(builder)
                ))
            }
            OutputFormat::Quiet => Ok(weights
                .entries()
                .iter()
                .map(|e| format!("{}={}", e.category, e.weight))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the preset list, marking the selected one.
    pub fn format_presets(
        &self,
        presets: &[RulePreset],
        selected: Option<PresetId>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "selected": selected,
                "presets": presets,
            }))?),
            OutputFormat::Table => {
                if presets.is_empty() {
                    return Ok(self.colorize("No presets saved.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["", "ID", "Name", "Profile", "Created (ms)"]);

                for preset in presets {
                    let marker = if selected == Some(preset.id) { "*" } else { "" };
                    let id = preset.id.to_string();
                    builder.push_record([
                        marker,
                        &id[..8], // Truncate ID for readability
                        &preset.name,
                        preset.profile_kind.as_str(),
                        &preset.created_at.to_string(),
                    ]);
                }

                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(presets
                .iter()
                .map(|p| p.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a score report.
    pub fn format_score(&self, report: &ScoreReport, identifier: Option<&str>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "identifier": identifier,
                "score": report.score,
                "band": report.band(),
                "profile_kind": report.profile_kind,
                "sections": report.sections,
            }))?),
            OutputFormat::Table => {
                let mut lines = Vec::new();
                if let Some(identifier) = identifier {
                    lines.push(format!("Identifier: {}", identifier));
                }
                lines.push(format!("Profile: {}", report.profile_kind));

                if !report.sections.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Category", "Raw", "Weight", "Override"]);
                    for section in &report.sections {
                        let reason = section.hard_override.map(|o| o.reason()).unwrap_or("");
                        builder.push_record([
                            section.category.label(),
                            &section.raw_score.to_string(),
                            &section.weight.to_string(),
                            reason,
                        ]);
                    }
                    lines.push(self.render(builder));
                }

                let color = match report.band() {
                    ScoreBand::LowRisk => "green",
                    ScoreBand::ModerateRisk => "yellow",
                    ScoreBand::HighRisk => "red",
                };
                lines.push(self.colorize(
                    &format!("Score: {} ({})", report.score, report.band().as_str()),
                    color,
                ));
                Ok(lines.join("\n"))
            }
            OutputFormat::Quiet => Ok(report.score.to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddscore_domain::identifier::validate;
    use ddscore_domain::{Category, ComplianceDossier, ScoringEngine};

    fn validations() -> Vec<(String, ValidationOutcome)> {
        ["11144477735", "11111111111"]
            .iter()
            .map(|s| (s.to_string(), validate(s)))
            .collect()
    }

    #[test]
    fn test_validation_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_validations(&validations()).unwrap();
        assert!(output.contains("111.444.777-35"));
        assert!(output.contains("Formatted"));
        assert!(output.contains("no"));
    }

    #[test]
    fn test_validation_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_validations(&validations()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json[0]["valid"], true);
        assert_eq!(json[0]["kind"], "individual");
        assert_eq!(json[1]["valid"], false);
    }

    #[test]
    fn test_validation_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_validations(&validations()).unwrap();
        assert_eq!(output, "valid\ninvalid");
    }

    #[test]
    fn test_weights_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let weights = ProfileKind::Organization.default_weights();
        let output = formatter
            .format_weights(ProfileKind::Organization, &weights)
            .unwrap();
        assert!(output.starts_with("registration=5"));
        assert_eq!(output.lines().count(), Category::COUNT);
    }

    #[test]
    fn test_weights_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let weights = ProfileKind::Technician.default_weights();
        let output = formatter
            .format_weights(ProfileKind::Technician, &weights)
            .unwrap();
        assert!(output.contains("Profile: technician"));
        assert!(output.contains("political_exposure"));
        assert!(output.contains("critical"));
    }

    #[test]
    fn test_empty_presets() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_presets(&[], None).unwrap();
        assert!(output.contains("No presets saved"));
    }

    #[test]
    fn test_presets_table_marks_selection() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let preset = RulePreset::capture(
            "baseline",
            ProfileKind::Organization,
            ProfileKind::Organization.default_weights(),
        );
        let output = formatter
            .format_presets(&[preset.clone()], Some(preset.id))
            .unwrap();
        assert!(output.contains("baseline"));
        assert!(output.contains('*'));
        assert!(output.contains(&preset.id.to_string()[..8]));
    }

    #[test]
    fn test_score_quiet_and_table() {
        let report = ScoringEngine::new().score_report(
            &ComplianceDossier::default(),
            &WeightSet::default(),
            ProfileKind::Organization,
        );

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_score(&report, None).unwrap(), "100");

        let table = Formatter::new(OutputFormat::Table, false);
        let output = table.format_score(&report, Some("111.444.777-35")).unwrap();
        assert!(output.contains("Identifier: 111.444.777-35"));
        assert!(output.contains("Score: 100 (low risk)"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
