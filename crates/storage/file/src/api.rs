//! Public API for the `file` crate

use crate::errors::FileError;
use page::page_id::{FileId, PageId};

/// An open file, as handed out by [`FileManager::open_file`]. Pass it back to
/// [`FileManager::close_file`] when done.
#[derive(Debug, PartialEq, Eq)]
pub struct FileHandle {
    pub(crate) file_id: FileId,
    pub(crate) name: String,
}

impl FileHandle {
    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// File manager public API
///
/// A `FileManager` stores named files made of fixed-size pages addressed by `PageId`.
/// Page numbers are dense: a file with `n` pages holds pages `0..n`, and new pages are always
/// appended. Page I/O is keyed by `FileId` alone and keeps working while no handle is open, so
/// a buffer pool can write back pages of files that have been closed.
pub trait FileManager: Send + Sync {
    /// Creates an empty file. Fails with `AlreadyExists` if the name is taken.
    fn create_file(&self, name: &str) -> Result<(), FileError>;

    /// Opens an existing file. A file may be opened several times; every handle must be closed.
    fn open_file(&self, name: &str) -> Result<FileHandle, FileError>;

    /// Closes a handle obtained from [`FileManager::open_file`].
    fn close_file(&self, handle: FileHandle) -> Result<(), FileError>;

    /// Removes a file and its pages. Fails with `StillOpen` while any handle is open.
    fn destroy_file(&self, name: &str) -> Result<(), FileError>;

    /// The `FileId` assigned to `name`, if the file is known.
    fn file_id(&self, name: &str) -> Option<FileId>;

    /// The first page of the file. Fails with `Empty` if the file has no pages yet.
    fn first_page(&self, handle: &FileHandle) -> Result<PageId, FileError>;

    /// Number of pages currently in the file.
    fn page_count(&self, file_id: FileId) -> Result<u32, FileError>;

    /// Appends a zeroed page to the file and returns its id.
    fn allocate_page(&self, file_id: FileId) -> Result<PageId, FileError>;

    /// Reads the page identified by `page_id` into `destination`, which must be exactly one page long.
    fn read_page(&self, page_id: PageId, destination: &mut [u8]) -> Result<(), FileError>;

    /// Writes one page worth of `page_data` as the page for `page_id`.
    fn write_page(&self, page_id: PageId, page_data: &[u8]) -> Result<(), FileError>;
}

/// Checks that a caller-provided page buffer is exactly one page long.
pub(crate) fn check_page_buffer(len: usize) -> Result<(), FileError> {
    if len != page::PAGE_SIZE {
        return Err(FileError::BufferSizeMismatch {
            expected: page::PAGE_SIZE,
            actual: len,
        });
    }
    Ok(())
}
