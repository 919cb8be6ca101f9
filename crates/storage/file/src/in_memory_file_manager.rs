use crate::api::{FileHandle, FileManager, check_page_buffer};
use crate::errors::FileError;
use crate::file_catalog::FileCatalog;
use page::PAGE_SIZE;
use page::page_id::{FileId, PageId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type PageBytes = Box<[u8; PAGE_SIZE]>;

/// File manager keeping every file as a vector of pages in memory. Nothing survives the process.
#[derive(Debug)]
pub struct InMemoryFileManager {
    file_catalog: Arc<FileCatalog>,
    files: RwLock<HashMap<FileId, Vec<PageBytes>>>,
}

impl Default for InMemoryFileManager {
    fn default() -> Self {
        Self::new(Arc::new(FileCatalog::new()))
    }
}

impl InMemoryFileManager {
    pub fn new(file_catalog: Arc<FileCatalog>) -> Self {
        Self {
            file_catalog,
            files: RwLock::new(HashMap::new()),
        }
    }

    pub fn file_catalog(&self) -> &Arc<FileCatalog> {
        &self.file_catalog
    }
}

impl FileManager for InMemoryFileManager {
    fn create_file(&self, name: &str) -> Result<(), FileError> {
        let file_id = self.file_catalog.register(name)?;
        self.files
            .write()
            .expect("InMemoryFileManager poisoned")
            .insert(file_id, Vec::new());
        Ok(())
    }

    fn open_file(&self, name: &str) -> Result<FileHandle, FileError> {
        let file_id = self
            .file_catalog
            .lookup(name)
            .ok_or_else(|| FileError::NotFound(name.to_string()))?;
        self.file_catalog.mark_open(file_id)?;
        Ok(FileHandle {
            file_id,
            name: name.to_string(),
        })
    }

    fn close_file(&self, handle: FileHandle) -> Result<(), FileError> {
        self.file_catalog.mark_closed(handle.file_id)?;
        Ok(())
    }

    fn destroy_file(&self, name: &str) -> Result<(), FileError> {
        let file_id = self.file_catalog.unregister(name)?;
        self.files
            .write()
            .expect("InMemoryFileManager poisoned")
            .remove(&file_id);
        Ok(())
    }

    fn file_id(&self, name: &str) -> Option<FileId> {
        self.file_catalog.lookup(name)
    }

    fn first_page(&self, handle: &FileHandle) -> Result<PageId, FileError> {
        if self.page_count(handle.file_id)? == 0 {
            return Err(FileError::Empty(handle.name.clone()));
        }
        Ok(PageId::new(handle.file_id, 0))
    }

    fn page_count(&self, file_id: FileId) -> Result<u32, FileError> {
        let files = self.files.read().expect("InMemoryFileManager poisoned");
        let pages = files.get(&file_id).ok_or(FileError::UnknownFile(file_id))?;
        Ok(pages.len() as u32)
    }

    fn allocate_page(&self, file_id: FileId) -> Result<PageId, FileError> {
        let mut files = self.files.write().expect("InMemoryFileManager poisoned");
        let pages = files
            .get_mut(&file_id)
            .ok_or(FileError::UnknownFile(file_id))?;
        pages.push(Box::new([0u8; PAGE_SIZE]));
        Ok(PageId::new(file_id, (pages.len() - 1) as u32))
    }

    fn read_page(&self, page_id: PageId, destination: &mut [u8]) -> Result<(), FileError> {
        check_page_buffer(destination.len())?;
        let files = self.files.read().expect("InMemoryFileManager poisoned");
        let page = files
            .get(&page_id.file_id)
            .ok_or(FileError::UnknownFile(page_id.file_id))?
            .get(page_id.page_number as usize)
            .ok_or(FileError::PageOutOfRange(page_id))?;
        destination.copy_from_slice(&page[..]);
        Ok(())
    }

    fn write_page(&self, page_id: PageId, page_data: &[u8]) -> Result<(), FileError> {
        check_page_buffer(page_data.len())?;
        let mut files = self.files.write().expect("InMemoryFileManager poisoned");
        let page = files
            .get_mut(&page_id.file_id)
            .ok_or(FileError::UnknownFile(page_id.file_id))?
            .get_mut(page_id.page_number as usize)
            .ok_or(FileError::PageOutOfRange(page_id))?;
        page.copy_from_slice(page_data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_open_allocate_write_read() {
        // Arrange
        let fm = InMemoryFileManager::default();
        fm.create_file("t.tbl").unwrap();
        let handle = fm.open_file("t.tbl").unwrap();

        // Act
        let page_id = fm.allocate_page(handle.file_id()).unwrap();
        fm.write_page(page_id, &[7u8; PAGE_SIZE]).unwrap();
        let mut buf = [0u8; PAGE_SIZE];
        fm.read_page(page_id, &mut buf).unwrap();

        // Assert
        assert_eq!(page_id, PageId::new(handle.file_id(), 0));
        assert_eq!(buf, [7u8; PAGE_SIZE]);
        assert_eq!(fm.first_page(&handle).unwrap(), page_id);
        fm.close_file(handle).unwrap();
    }

    #[test]
    fn create_existing_file_fails() {
        let fm = InMemoryFileManager::default();
        fm.create_file("t.tbl").unwrap();

        assert!(matches!(
            fm.create_file("t.tbl"),
            Err(FileError::AlreadyExists(_))
        ));
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let fm = InMemoryFileManager::default();

        assert!(matches!(fm.open_file("nope"), Err(FileError::NotFound(_))));
    }

    #[test]
    fn first_page_of_empty_file_fails() {
        let fm = InMemoryFileManager::default();
        fm.create_file("t.tbl").unwrap();
        let handle = fm.open_file("t.tbl").unwrap();

        assert!(matches!(fm.first_page(&handle), Err(FileError::Empty(_))));
    }

    #[test]
    fn destroy_requires_all_handles_closed() {
        let fm = InMemoryFileManager::default();
        fm.create_file("t.tbl").unwrap();
        let handle = fm.open_file("t.tbl").unwrap();

        assert!(matches!(
            fm.destroy_file("t.tbl"),
            Err(FileError::StillOpen(_))
        ));

        fm.close_file(handle).unwrap();
        fm.destroy_file("t.tbl").unwrap();
        assert!(matches!(fm.open_file("t.tbl"), Err(FileError::NotFound(_))));
    }

    #[test]
    fn reading_unallocated_page_is_out_of_range() {
        let fm = InMemoryFileManager::default();
        fm.create_file("t.tbl").unwrap();
        let file_id = fm.file_id("t.tbl").unwrap();
        let mut buf = [0u8; PAGE_SIZE];

        assert!(matches!(
            fm.read_page(PageId::new(file_id, 3), &mut buf),
            Err(FileError::PageOutOfRange(_))
        ));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let fm = InMemoryFileManager::default();
        fm.create_file("t.tbl").unwrap();
        let file_id = fm.file_id("t.tbl").unwrap();
        fm.allocate_page(file_id).unwrap();
        let mut buf = [0u8; 10];

        assert!(matches!(
            fm.read_page(PageId::new(file_id, 0), &mut buf),
            Err(FileError::BufferSizeMismatch {
                expected: PAGE_SIZE,
                actual: 10
            })
        ));
    }
}
