// In crates/app-config/src/error.rs

use thiserror::Error;

/// Why settings could not be built.
#[derive(Error, Debug)]
pub enum Error {
    /// A source could not be merged, or the merged values do not fit `Settings`.
    #[error("Invalid configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Settings are not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
