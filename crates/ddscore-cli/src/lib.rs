//! ddscore CLI library.
//!
//! This library provides the core functionality for the ddscore command-line
//! interface, including configuration management, command execution, and
//! output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

use ddscore_domain::ProfileRepository;
use ddscore_store::{MemoryRepository, SqliteRepository, StoreError, WeightProfileStore};
use std::path::PathBuf;

/// Repository selected at startup.
pub type DynRepository = Box<dyn ProfileRepository<Error = StoreError> + Send>;

/// Profile store used by the commands.
pub type ProfileStore = WeightProfileStore<DynRepository>;

/// Open the profile store.
///
/// `database` overrides the configured path; `ephemeral` keeps everything
/// in memory.
pub fn open_store(config: &Config, database: Option<PathBuf>, ephemeral: bool) -> Result<ProfileStore> {
    let repo: DynRepository = if ephemeral {
        tracing::debug!("Using in-memory profile store");
        Box::new(MemoryRepository::new())
    } else {
        let path = match database {
            Some(path) => path,
            None => config.database_path()?,
        };
        tracing::debug!("Opening profile store at {}", path.display());
        Box::new(SqliteRepository::new(path)?)
    };

    Ok(WeightProfileStore::open(repo)?)
}
