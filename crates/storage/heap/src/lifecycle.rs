//! Creating and destroying heap files.

use crate::errors::{HeapError, HeapResult};
use crate::file_header::{FileHeaderMut, MAX_NAME_LEN};
use crate::open_file::OpenFile;
use buffer::buffer::BufferManager;
use file::api::FileManager;
use std::sync::Arc;
use tracing::info;

/// Creates the heap file `name` with a header page and one empty data page, and flushes both
/// to the file.
///
/// # Errors
/// `FileExists` if a file with that name can already be opened, `NameTooLong` if the name does
/// not fit in the header. Any other failure is returned as is and may leave a partially built
/// file behind.
pub fn create_heap_file<F: FileManager>(
    name: &str,
    file_manager: &Arc<F>,
    buffer: &Arc<BufferManager<F>>,
) -> HeapResult<()> {
    if name.len() > MAX_NAME_LEN {
        return Err(HeapError::NameTooLong {
            len: name.len(),
            max: MAX_NAME_LEN,
        });
    }

    if let Ok(handle) = file_manager.open_file(name) {
        file_manager.close_file(handle)?;
        return Err(HeapError::FileExists(name.to_string()));
    }

    file_manager.create_file(name)?;
    let file = OpenFile::open(Arc::clone(file_manager), name)?;

    let mut header_page = buffer.allocate_page(file.file_id())?;
    let mut data_page = buffer.allocate_page(file.file_id())?;

    data_page
        .write()
        .initialize(data_page.page_id())?;
    data_page.mark_dirty();

    {
        let mut guard = header_page.write();
        FileHeaderMut::new(guard.data_mut())?.initialize(name, data_page.page_number())?;
    }
    header_page.mark_dirty();

    data_page.release()?;
    header_page.release()?;
    buffer.flush_file(file.file_id())?;
    file.close()?;

    info!(file = name, "created heap file");
    Ok(())
}

/// Destroys the heap file `name`. Its pages still in the buffer pool are dropped unwritten.
///
/// # Errors
/// `Buffer(PagePinned)` while a session still has the file open, file errors otherwise.
pub fn destroy_heap_file<F: FileManager>(
    name: &str,
    file_manager: &Arc<F>,
    buffer: &Arc<BufferManager<F>>,
) -> HeapResult<()> {
    if let Some(file_id) = file_manager.file_id(name) {
        buffer.discard_file(file_id)?;
    }
    file_manager.destroy_file(name)?;

    info!(file = name, "destroyed heap file");
    Ok(())
}
