// In crates/app-config/src/types.rs

use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the backend HTTP API.
    pub api: ApiSettings,
    /// Refresh intervals for each polled view.
    pub polling: PollingSettings,
    /// Where `serve-stub` listens.
    pub stub_server: ServerSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiSettings {
    /// The backend origin including the `/api` prefix, without a trailing slash.
    pub base_url: String,
    /// Optional per-request timeout. Unset keeps the transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct PollingSettings {
    pub dashboard_secs: u64,
    pub agents_secs: u64,
    pub markets_secs: u64,
}

impl PollingSettings {
    pub fn dashboard(&self) -> Duration {
        interval(self.dashboard_secs)
    }

    pub fn agents(&self) -> Duration {
        interval(self.agents_secs)
    }

    pub fn markets(&self) -> Duration {
        interval(self.markets_secs)
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            dashboard_secs: DEFAULT_DASHBOARD_SECS,
            agents_secs: DEFAULT_AGENTS_SECS,
            markets_secs: DEFAULT_MARKETS_SECS,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_DASHBOARD_SECS: u64 = 5;
pub const DEFAULT_AGENTS_SECS: u64 = 5;
pub const DEFAULT_MARKETS_SECS: u64 = 30;

// A zero interval would make tokio's `interval` panic.
fn interval(secs: u64) -> Duration {
    Duration::from_secs(secs.max(1))
}
