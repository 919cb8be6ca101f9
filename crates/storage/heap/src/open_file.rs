use file::api::{FileHandle, FileManager};
use file::errors::FileError;
use page::page_id::{FileId, PageId};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// An open file handle that is closed when dropped.
pub(crate) struct OpenFile<F: FileManager> {
    file_manager: Arc<F>,
    file_id: FileId,
    handle: Option<FileHandle>,
}

impl<F: FileManager> OpenFile<F> {
    pub(crate) fn open(file_manager: Arc<F>, name: &str) -> Result<Self, FileError> {
        let handle = file_manager.open_file(name)?;
        Ok(Self {
            file_manager,
            file_id: handle.file_id(),
            handle: Some(handle),
        })
    }

    pub(crate) fn file_id(&self) -> FileId {
        self.file_id
    }

    pub(crate) fn name(&self) -> &str {
        self.handle.as_ref().map_or("", FileHandle::name)
    }

    /// Page holding the heap file header.
    pub(crate) fn first_page(&self) -> Result<PageId, FileError> {
        match &self.handle {
            Some(handle) => self.file_manager.first_page(handle),
            None => Err(FileError::NotOpen(self.file_id)),
        }
    }

    pub(crate) fn close(mut self) -> Result<(), FileError> {
        match self.handle.take() {
            Some(handle) => self.file_manager.close_file(handle),
            None => Ok(()),
        }
    }
}

impl<F: FileManager> Drop for OpenFile<F> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = self.file_manager.close_file(handle) {
                warn!(file_id = self.file_id, error = %e, "failed to close file on drop");
            }
        }
    }
}

impl<F: FileManager> fmt::Debug for OpenFile<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenFile")
            .field("file_id", &self.file_id)
            .field("handle", &self.handle)
            .finish()
    }
}
