use crate::heap_file::HeapFile;
use crate::insert_scan::InsertFileScan;
use crate::lifecycle::create_heap_file;
use crate::rid::Rid;
use buffer::buffer::BufferManager;
use file::api::FileManager;
use file::in_memory_file_manager::InMemoryFileManager;
use page::page_id::PageId;
use std::sync::Arc;

mod heap_file_tests;

pub(crate) type TestFileManager = InMemoryFileManager;
pub(crate) type TestBuffer = Arc<BufferManager<TestFileManager>>;

/// Records of this size fill a fresh page after `RECORDS_PER_PAGE` inserts.
pub(crate) const RECORD_LEN: usize = 100;
pub(crate) const RECORDS_PER_PAGE: usize = 38;

pub(crate) struct TestEnv {
    pub(crate) fm: Arc<TestFileManager>,
    pub(crate) buffer: TestBuffer,
}

impl TestEnv {
    pub(crate) fn new(pool_size: usize) -> Self {
        let fm = Arc::new(TestFileManager::default());
        let buffer = Arc::new(BufferManager::new(Arc::clone(&fm), pool_size));
        Self { fm, buffer }
    }

    /// Environment with a freshly created heap file called `name`.
    pub(crate) fn with_file(name: &str) -> Self {
        let env = Self::new(16);
        create_heap_file(name, &env.fm, &env.buffer).unwrap();
        env
    }

    pub(crate) fn open(&self, name: &str) -> HeapFile<TestFileManager> {
        HeapFile::open(name, Arc::clone(&self.fm), Arc::clone(&self.buffer)).unwrap()
    }

    pub(crate) fn inserter(&self, name: &str) -> InsertFileScan<TestFileManager> {
        InsertFileScan::new(name, Arc::clone(&self.fm), Arc::clone(&self.buffer)).unwrap()
    }

    /// Inserts `count` records keyed `0..count` and returns their ids.
    pub(crate) fn insert_keys(&self, name: &str, count: usize) -> Vec<Rid> {
        let mut inserter = self.inserter(name);
        let rids = (0..count)
            .map(|key| inserter.insert_record(&record(key as i32)).unwrap())
            .collect();
        inserter.close().unwrap();
        rids
    }

    /// Sum of the pin counts of every page of `name`.
    pub(crate) fn total_pins(&self, name: &str) -> u32 {
        let file_id = self.fm.file_id(name).unwrap();
        let page_count = self.fm.page_count(file_id).unwrap();
        (0..page_count)
            .map(|page_no| self.buffer.pin_count(PageId::new(file_id, page_no)))
            .sum()
    }
}

/// `RECORD_LEN` bytes with `key` as a little-endian i32 at offset 0.
pub(crate) fn record(key: i32) -> Vec<u8> {
    let mut record = vec![0xEEu8; RECORD_LEN];
    record[..4].copy_from_slice(&key.to_le_bytes());
    record
}

pub(crate) fn key_of(record: &[u8]) -> i32 {
    i32::from_le_bytes(record[..4].try_into().unwrap())
}
