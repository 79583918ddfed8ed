// In crates/stub-server/src/error.rs

use axum::Json;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to bind server address: {0}")]
    ServerBindError(#[source] std::io::Error),
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // The real backend answers unknown ids with a 200 and an error object.
        Json(serde_json::json!({ "error": self.to_string() })).into_response()
    }
}
