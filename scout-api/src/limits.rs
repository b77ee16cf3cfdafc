use thiserror::Error;

/// Cap on search response bodies.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum LimitError {
    #[error("response too large: {actual} bytes (max {max})")]
    TooLarge { max: usize, actual: usize },
}

pub fn enforce_max_response_size(len: usize) -> Result<(), LimitError> {
    if len > MAX_RESPONSE_BYTES {
        return Err(LimitError::TooLarge {
            max: MAX_RESPONSE_BYTES,
            actual: len,
        });
    }
    Ok(())
}
