use thiserror::Error;

/// Crate-wide error type. Fatal conditions only: per-keypoint rejections
/// (non-convergence, contrast, edge, out-of-bounds patches) are silent
/// drops from a returned `Vec`, never an `Error` variant.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Compute backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, Error>;
