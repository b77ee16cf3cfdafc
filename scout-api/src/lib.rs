pub mod limits;
pub mod request;
pub mod response;
pub mod result;
pub mod status;

use thiserror::Error;

/// Failures translating between wire bytes and typed payloads.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    TooLarge(#[from] limits::LimitError),
}
