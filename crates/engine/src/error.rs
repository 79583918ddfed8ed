// In crates/engine/src/error.rs

use thiserror::Error;

/// Why a poll produced no snapshot.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] api_client::Error),
    #[error("{0} came back empty")]
    Empty(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
