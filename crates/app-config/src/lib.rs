// In crates/app-config/src/lib.rs

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{ApiSettings, AppSettings, PollingSettings, ServerSettings, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Starts from built-in defaults, so the client runs without any file.
/// 2. Merges a `config/base.toml` file, if present.
/// 3. Merges an environment-specific file (e.g., `config/development.toml`).
/// 4. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = with_defaults(Config::builder(), &environment)?
        .add_source(File::with_name("config/base").required(false))
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        .add_source(environment_source())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Environment variables such as `APP__API__BASE_URL`. The `__` separator
/// also splits the prefix from the key, so `APP_API__BASE_URL` is ignored.
fn environment_source() -> Environment {
    Environment::with_prefix("APP").separator("__")
}

/// Parses settings from a TOML string layered over the built-in defaults.
pub fn settings_from_toml(content: &str) -> Result<Settings> {
    // Validate the syntax first so a typo reports the TOML position.
    toml::from_str::<toml::Table>(content)?;

    let settings = with_defaults(Config::builder(), "development")?
        .add_source(File::from_str(content, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
    environment: &str,
) -> Result<ConfigBuilder<DefaultState>> {
    Ok(builder
        .set_default("app.environment", environment)?
        .set_default("app.log_level", "info")?
        .set_default("api.base_url", types::DEFAULT_BASE_URL)?
        .set_default("polling.dashboard_secs", types::DEFAULT_DASHBOARD_SECS)?
        .set_default("polling.agents_secs", types::DEFAULT_AGENTS_SECS)?
        .set_default("polling.markets_secs", types::DEFAULT_MARKETS_SECS)?
        .set_default("stub_server.host", "127.0.0.1")?
        .set_default("stub_server.port", 8000_i64)?)
}
