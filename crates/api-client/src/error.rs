// In crates/api-client/src/error.rs

use thiserror::Error;

/// Why a backend call came back "unavailable".
///
/// Callers treat every variant the same way (the data is absent); the
/// variants exist so the reason survives into logs and diagnostics.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(#[source] reqwest::Error),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("HTTP {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("Backend rejected the request: {message}")]
    Rejected { message: String },
}

impl Error {
    /// A short, stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ClientBuildError(_) => "client_build",
            Error::RequestFailed(_) => "transport",
            Error::Status { .. } => "status",
            Error::DeserializationFailed(_) => "malformed",
            Error::Rejected { .. } => "rejected",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
