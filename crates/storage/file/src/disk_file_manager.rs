use crate::api::{FileHandle, FileManager, check_page_buffer};
use crate::errors::FileError;
use crate::file_catalog::FileCatalog;
use page::PAGE_SIZE;
use page::page_id::{FileId, PageId};
use std::collections::HashMap;
use std::fs;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;

#[cfg(unix)]
use std::os::unix::fs::FileExt;
#[cfg(windows)]
use std::os::windows::fs::FileExt;

/// A disk based file manager. Every file lives as `<data_dir>/<name>`, its pages stored back
/// to back.
#[derive(Debug)]
pub struct DiskFileManager {
    data_dir: PathBuf,
    files: RwLock<HashMap<FileId, Arc<File>>>,
    file_catalog: Arc<FileCatalog>,
}

impl DiskFileManager {
    pub fn new(data_dir: impl Into<PathBuf>, file_catalog: Arc<FileCatalog>) -> Self {
        Self {
            data_dir: data_dir.into(),
            files: RwLock::new(HashMap::new()),
            file_catalog,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    fn io_error(path: &Path) -> impl FnOnce(io::Error) -> FileError + '_ {
        move |source| FileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Resolves `name` to an id, registering files that exist on disk but were created by an
    /// earlier process.
    fn resolve(&self, name: &str) -> Result<FileId, FileError> {
        if let Some(file_id) = self.file_catalog.lookup(name) {
            return Ok(file_id);
        }

        let path = self.path_of(name);
        if !path.is_file() {
            return Err(FileError::NotFound(name.to_string()));
        }

        debug!(file = name, "registering existing file");
        match self.file_catalog.register(name) {
            Ok(file_id) => Ok(file_id),
            // Lost a race with another opener.
            Err(FileError::AlreadyExists(_)) => self
                .file_catalog
                .lookup(name)
                .ok_or_else(|| FileError::NotFound(name.to_string())),
            Err(e) => Err(e),
        }
    }

    fn get_or_open_file(&self, file_id: FileId) -> Result<Arc<File>, FileError> {
        // Fast path, read lock
        {
            let files = self.files.read().expect("DiskFileManager poisoned");
            if let Some(file) = files.get(&file_id) {
                return Ok(Arc::clone(file));
            }
        }

        let mut files = self.files.write().expect("DiskFileManager poisoned");

        if let Some(file) = files.get(&file_id) {
            return Ok(Arc::clone(file));
        }

        let name = self
            .file_catalog
            .file_name(file_id)
            .ok_or(FileError::UnknownFile(file_id))?;
        let path = self.path_of(&name);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(Self::io_error(&path))?;

        let file = Arc::new(file);
        files.insert(file_id, Arc::clone(&file));

        Ok(file)
    }

    fn offset_of(page_id: PageId) -> u64 {
        page_id.page_number as u64 * PAGE_SIZE as u64
    }

    fn file_len(&self, file_id: FileId, file: &File) -> Result<u64, FileError> {
        file.metadata().map(|m| m.len()).map_err(|source| FileError::Io {
            path: self.file_path_for(file_id),
            source,
        })
    }

    fn file_path_for(&self, file_id: FileId) -> PathBuf {
        self.file_catalog
            .file_name(file_id)
            .map(|name| self.path_of(&name))
            .unwrap_or_else(|| self.data_dir.clone())
    }

    #[inline]
    fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        #[cfg(unix)]
        {
            file.read_at(buf, offset)
        }

        #[cfg(windows)]
        {
            file.seek_read(buf, offset)
        }
    }

    #[inline]
    fn write_at(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
        #[cfg(unix)]
        {
            file.write_at(buf, offset)
        }

        #[cfg(windows)]
        {
            file.seek_write(buf, offset)
        }
    }
}

impl FileManager for DiskFileManager {
    fn create_file(&self, name: &str) -> Result<(), FileError> {
        let path = self.path_of(name);
        if self.file_catalog.lookup(name).is_some() || path.exists() {
            return Err(FileError::AlreadyExists(name.to_string()));
        }

        fs::create_dir_all(&self.data_dir).map_err(Self::io_error(&self.data_dir))?;
        OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                io::ErrorKind::AlreadyExists => FileError::AlreadyExists(name.to_string()),
                _ => FileError::Io {
                    path: path.clone(),
                    source,
                },
            })?;

        self.file_catalog.register(name)?;
        debug!(file = name, path = %path.display(), "created file");
        Ok(())
    }

    fn open_file(&self, name: &str) -> Result<FileHandle, FileError> {
        let file_id = self.resolve(name)?;
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
        // Make sure files from an earlier process are known before unregistering.
        self.resolve(name)?;
        let file_id = self.file_catalog.unregister(name)?;
        self.files
            .write()
            .expect("DiskFileManager poisoned")
            .remove(&file_id);

        let path = self.path_of(name);
        fs::remove_file(&path).map_err(Self::io_error(&path))?;
        debug!(file = name, "destroyed file");
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
        let file = self.get_or_open_file(file_id)?;
        let len = self.file_len(file_id, &file)?;
        Ok((len / PAGE_SIZE as u64) as u32)
    }

    fn allocate_page(&self, file_id: FileId) -> Result<PageId, FileError> {
        let file = self.get_or_open_file(file_id)?;

        // Serialize appends so two callers never get the same page number.
        let _files = self.files.write().expect("DiskFileManager poisoned");
        let page_number = (self.file_len(file_id, &file)? / PAGE_SIZE as u64) as u32;
        let page_id = PageId::new(file_id, page_number);
        file.set_len(Self::offset_of(page_id) + PAGE_SIZE as u64)
            .map_err(|source| FileError::Io {
                path: self.file_path_for(file_id),
                source,
            })?;

        Ok(page_id)
    }

    fn read_page(&self, page_id: PageId, destination: &mut [u8]) -> Result<(), FileError> {
        check_page_buffer(destination.len())?;
        let file = self.get_or_open_file(page_id.file_id)?;

        let offset = Self::offset_of(page_id);
        if self.file_len(page_id.file_id, &file)? < offset + PAGE_SIZE as u64 {
            return Err(FileError::PageOutOfRange(page_id));
        }

        let mut read = 0;
        while read < PAGE_SIZE {
            let n = Self::read_at(&file, &mut destination[read..], offset + read as u64).map_err(
                |source| FileError::Io {
                    path: self.file_path_for(page_id.file_id),
                    source,
                },
            )?;
            if n == 0 {
                return Err(FileError::PageOutOfRange(page_id));
            }
            read += n;
        }

        Ok(())
    }

    fn write_page(&self, page_id: PageId, page_data: &[u8]) -> Result<(), FileError> {
        check_page_buffer(page_data.len())?;
        let file = self.get_or_open_file(page_id.file_id)?;

        let offset = Self::offset_of(page_id);
        if self.file_len(page_id.file_id, &file)? < offset + PAGE_SIZE as u64 {
            return Err(FileError::PageOutOfRange(page_id));
        }

        let mut written = 0;
        while written < PAGE_SIZE {
            let n = Self::write_at(&file, &page_data[written..], offset + written as u64)
                .map_err(|source| FileError::Io {
                    path: self.file_path_for(page_id.file_id),
                    source,
                })?;

            if n == 0 {
                return Err(FileError::Io {
                    path: self.file_path_for(page_id.file_id),
                    source: io::Error::new(io::ErrorKind::WriteZero, "wrote 0 bytes"),
                });
            }

            written += n;
        }

        Ok(())
    }
}
