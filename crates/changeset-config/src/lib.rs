mod config;
mod error;
mod raw;

pub use config::{ChangesetConfig, DEFAULT_CONFIG_FILE, PrivatePackagesConfig};
pub use error::ConfigError;
