use file::errors::FileError;
use page::page_id::{FileId, PageId};
use thiserror::Error;

/// Buffer error.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Every frame is pinned, nothing can be evicted
    #[error("buffer pool is full: every frame is pinned")]
    BufferFull,
    /// Could not read the page from its file
    #[error("failed to read page {page_id}")]
    ReadFailed {
        page_id: PageId,
        #[source]
        source: FileError,
    },
    /// Could not write a dirty page back to its file
    #[error("failed to write page {page_id}")]
    WriteFailed {
        page_id: PageId,
        #[source]
        source: FileError,
    },
    /// The file manager refused to append a page
    #[error("failed to allocate a page in file {file_id}")]
    AllocateFailed {
        file_id: FileId,
        #[source]
        source: FileError,
    },
    /// Unpin of a page whose pin count is already zero
    #[error("page {0} is not pinned")]
    PageNotPinned(PageId),
    /// The page is not held by any frame
    #[error("page {0} is not in the buffer pool")]
    PageNotResident(PageId),
    /// The operation needs the page unpinned
    #[error("page {0} is still pinned")]
    PagePinned(PageId),
}
