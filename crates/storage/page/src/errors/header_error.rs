use binary_helpers::bin_error::BinaryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum HeaderError {
    #[error("Header error")]
    BinaryError(#[from] BinaryError),
    #[error("Header view expects exactly {expected} bytes, got {actual}")]
    HeaderSliceSizeMismatch { expected: usize, actual: usize },
}
