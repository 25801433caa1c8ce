//! Command implementations.

pub mod identifier;
pub mod preset;
pub mod profile;
pub mod score;
pub mod weights;

pub use self::identifier::{execute_format, execute_validate};
pub use self::preset::execute_preset;
pub use self::profile::execute_profile;
pub use self::score::execute_score;
pub use self::weights::execute_weights;
