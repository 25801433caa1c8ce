//! ddscore CLI - identifier validation and due-diligence scoring.

use clap::Parser;
use ddscore_cli::commands;
use ddscore_cli::{Cli, Command, Config, Formatter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but reported a negative result.
fn run() -> ddscore_cli::Result<bool> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let config = if config_path.exists() {
        Config::load_from(&config_path)?
    } else {
        let cfg = Config::default();
        cfg.save_to(&config_path).ok();
        cfg
    };

    // Initialize tracing (log to stderr)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.settings.log_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    let open_store = || {
        ddscore_cli::open_store(&config, cli.database.clone().map(PathBuf::from), cli.ephemeral)
    };
    match cli.command {
        Command::Validate(args) => return commands::execute_validate(args, &formatter),
        Command::Format(args) => commands::execute_format(args, &formatter)?,
        Command::Score(args) => commands::execute_score(args, &open_store()?, &formatter)?,
        Command::Weights(args) => commands::execute_weights(args, &open_store()?, &formatter)?,
        Command::Profile(args) => commands::execute_profile(args, &open_store()?, &formatter)?,
        Command::Preset(args) => commands::execute_preset(args, &open_store()?, &formatter)?,
    }

    Ok(true)
}
