//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use ddscore_domain::ProfileKind;

/// ddscore - Validate identifiers and score due-diligence dossiers.
#[derive(Debug, Parser)]
#[command(name = "ddscore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Weight profile database path
    #[arg(long, global = true, env = "DDSCORE_DB")]
    pub database: Option<String>,

    /// Keep profile state in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate one or more identifiers
    Validate(ValidateArgs),

    /// Format a partial or complete identifier as typed
    Format(FormatArgs),

    /// Score a dossier with the active profile
    Score(ScoreArgs),

    /// Show or edit the active weight set
    Weights(WeightsArgs),

    /// Show or switch the active profile kind
    Profile(ProfileArgs),

    /// Manage saved presets
    Preset(PresetArgs),
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Identifiers to validate (punctuation is ignored)
    #[arg(required = true)]
    pub identifiers: Vec<String>,
}

/// Arguments for the format command.
#[derive(Debug, Parser)]
pub struct FormatArgs {
    /// Identifier input
    pub identifier: String,
}

/// Arguments for the score command.
#[derive(Debug, Parser)]
pub struct ScoreArgs {
    /// JSON dossier file (reads stdin when omitted or "-")
    pub file: Option<String>,
}

/// Arguments for weight management.
#[derive(Debug, Parser)]
pub struct WeightsArgs {
    #[command(subcommand)]
    pub action: WeightsAction,
}

/// Weight management actions.
#[derive(Debug, Subcommand)]
pub enum WeightsAction {
    /// Show the active weight set
    Show,

    /// Change the weight of one category
    Set {
        /// Category key (e.g. political_exposure)
        category: String,
        /// Weight between 1 and 10
        weight: u8,
    },

    /// Restore the active profile's built-in defaults
    Reset,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Show the active profile kind
    Show,

    /// Switch to a different profile kind
    Switch {
        /// Profile kind
        #[arg(value_enum)]
        kind: ProfileArg,
    },
}

/// Arguments for preset management.
#[derive(Debug, Parser)]
pub struct PresetArgs {
    #[command(subcommand)]
    pub action: PresetAction,
}

/// Preset management actions.
#[derive(Debug, Subcommand)]
pub enum PresetAction {
    /// List saved presets
    List,

    /// Save the active configuration as a preset
    Save {
        /// Preset name
        name: String,
    },

    /// Make a preset the active configuration
    Load {
        /// Preset id, unique id prefix, or name
        preset: String,
    },

    /// Delete a preset
    Delete {
        /// Preset id, unique id prefix, or name
        preset: String,
    },
}

/// Profile kind argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProfileArg {
    /// Individual technician screening
    Technician,
    /// Organization due diligence
    Organization,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ProfileArg> for ProfileKind {
    fn from(kind: ProfileArg) -> Self {
        match kind {
            ProfileArg::Technician => ProfileKind::Technician,
            ProfileArg::Organization => ProfileKind::Organization,
        }
    }
}
