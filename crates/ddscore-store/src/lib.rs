//! ddscore Storage Layer
//!
//! Owns the weight profile state and its persistence.
//!
//! # Architecture
//!
//! - [`WeightProfileStore`] holds the active profile kind, its weight set,
//!   the preset log and the selected preset behind a single mutex
//! - [`SqliteRepository`] persists that state in SQLite
//! - [`MemoryRepository`] keeps it in process, for tests and scratch runs
//!
//! # Examples
//!
//! ```no_run
//! use ddscore_store::{SqliteRepository, WeightProfileStore};
//!
//! let repo = SqliteRepository::new("ddscore.db").unwrap();
//! let store = WeightProfileStore::open(repo).unwrap();
//! println!("{}", store.active_profile_kind().unwrap());
//! ```

#![warn(missing_docs)]

mod memory;
mod profile_store;
mod sqlite;

pub use memory::MemoryRepository;
pub use profile_store::{ProfileSnapshot, WeightProfileStore};
pub use sqlite::SqliteRepository;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A thread panicked while holding the store lock
    #[error("Profile store lock poisoned")]
    LockPoisoned,
}
