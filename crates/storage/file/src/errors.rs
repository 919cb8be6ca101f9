use page::page_id::{FileId, PageId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("file `{0}` already exists")]
    AlreadyExists(String),
    #[error("file `{0}` not found")]
    NotFound(String),
    #[error("file `{0}` is still open")]
    StillOpen(String),
    #[error("file {0} is not open")]
    NotOpen(FileId),
    #[error("unknown file id {0}")]
    UnknownFile(FileId),
    #[error("file `{0}` has no pages")]
    Empty(String),
    #[error("page {0} is past the end of its file")]
    PageOutOfRange(PageId),
    #[error("page buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
