use binary_helpers::bin_error::BinaryError;
use buffer::errors::BufferError;
use file::errors::FileError;
use page::errors::page_error::PageError;
use thiserror::Error;

/// Errors reported by heap file operations.
///
/// End of a scan is not an error: `scan_next` returns `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum HeapError {
    #[error("heap file `{0}` already exists")]
    FileExists(String),
    #[error("heap file name is {len} bytes long, at most {max} are allowed")]
    NameTooLong { len: usize, max: usize },
    #[error(transparent)]
    File(#[from] FileError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("malformed heap file header")]
    Header(#[from] BinaryError),
    #[error("bad scan parameter: {0}")]
    BadScanParm(&'static str),
    #[error("record of {len} bytes does not fit in a page (max {max})")]
    InvalidRecLen { len: usize, max: usize },
    #[error("no current record")]
    NoCurrentRecord,
}

impl HeapError {
    /// True when a record lookup hit a deleted or non-existent slot.
    pub fn is_record_not_found(&self) -> bool {
        matches!(self, HeapError::Page(e) if e.is_invalid_slot())
    }
}

pub type HeapResult<T> = Result<T, HeapError>;
