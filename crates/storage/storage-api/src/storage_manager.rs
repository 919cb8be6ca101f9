//! The storage manager
use buffer::buffer::BufferManager;
use buffer::errors::BufferError;
use file::api::FileManager;
use heap::errors::HeapResult;
use heap::heap_file::HeapFile;
use heap::insert_scan::InsertFileScan;
use heap::lifecycle::{create_heap_file, destroy_heap_file};
use heap::scan::HeapFileScan;
use std::sync::Arc;
use tracing::debug;

/// The storage manager
///
/// Owns the shared file manager and buffer pool and hands them to every heap file it opens.
#[derive(Debug)]
pub struct StorageManager<F: FileManager> {
    file_manager: Arc<F>,
    buffer_manager: Arc<BufferManager<F>>,
}

impl<F: FileManager> StorageManager<F> {
    /// Creates a new instance of the `StorageManager`
    pub fn new(file_manager: Arc<F>, buffer_manager: Arc<BufferManager<F>>) -> Self {
        Self {
            file_manager,
            buffer_manager,
        }
    }

    /// Builds a buffer pool of `pool_size` frames over `file_manager`.
    pub fn with_pool_size(file_manager: Arc<F>, pool_size: usize) -> Self {
        let buffer_manager = Arc::new(BufferManager::new(Arc::clone(&file_manager), pool_size));
        debug!(pool_size, "created buffer pool");
        Self::new(file_manager, buffer_manager)
    }

    pub fn file_manager(&self) -> &Arc<F> {
        &self.file_manager
    }

    pub fn buffer_manager(&self) -> &Arc<BufferManager<F>> {
        &self.buffer_manager
    }

    pub fn create_heap_file(&self, name: &str) -> HeapResult<()> {
        create_heap_file(name, &self.file_manager, &self.buffer_manager)
    }

    pub fn destroy_heap_file(&self, name: &str) -> HeapResult<()> {
        destroy_heap_file(name, &self.file_manager, &self.buffer_manager)
    }

    pub fn open_heap_file(&self, name: &str) -> HeapResult<HeapFile<F>> {
        HeapFile::open(
            name,
            Arc::clone(&self.file_manager),
            Arc::clone(&self.buffer_manager),
        )
    }

    pub fn open_scan(&self, name: &str) -> HeapResult<HeapFileScan<F>> {
        HeapFileScan::new(
            name,
            Arc::clone(&self.file_manager),
            Arc::clone(&self.buffer_manager),
        )
    }

    pub fn open_insert(&self, name: &str) -> HeapResult<InsertFileScan<F>> {
        InsertFileScan::new(
            name,
            Arc::clone(&self.file_manager),
            Arc::clone(&self.buffer_manager),
        )
    }

    /// Writes every dirty page in the pool back to its file.
    pub fn flush_all(&self) -> Result<(), BufferError> {
        self.buffer_manager.flush_all()
    }
}
