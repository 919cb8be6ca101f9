use crate::config::{KEY_SIZE, WorkloadConfig};
use file::api::FileManager;
use heap::errors::HeapError;
use heap::predicate::{Datatype, Operator};
use std::error::Error;
use storage_api::storage_manager::StorageManager;
use tracing::info;

/// Counts gathered by [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadReport {
    pub inserted: u32,
    pub rec_cnt: u32,
    pub page_cnt: u32,
    pub matched: u32,
}

/// Record of `size` bytes starting with `key` as a little-endian i32.
pub fn build_record(key: i32, size: usize) -> Vec<u8> {
    let mut record = vec![b'.'; size.max(KEY_SIZE)];
    record[..KEY_SIZE].copy_from_slice(&key.to_le_bytes());
    record
}

/// Creates the workload file if needed, appends `records` records keyed `0..records`, then scans
/// for keys at or above `records / 2`.
pub fn run<F: FileManager>(
    storage: &StorageManager<F>,
    workload: &WorkloadConfig,
) -> Result<WorkloadReport, Box<dyn Error + Send + Sync>> {
    let name = workload.file_name.as_str();
    match storage.create_heap_file(name) {
        Ok(()) => {}
        Err(HeapError::FileExists(_)) => info!(file = name, "appending to existing heap file"),
        Err(e) => return Err(e.into()),
    }

    let mut inserter = storage.open_insert(name)?;
    for key in 0..workload.records {
        inserter.insert_record(&build_record(i32::try_from(key)?, workload.record_size))?;
    }
    let header = inserter.heap().header_info()?;
    inserter.close()?;
    info!(
        file = name,
        inserted = workload.records,
        rec_cnt = header.rec_cnt,
        page_cnt = header.page_cnt,
        "load finished"
    );

    let threshold = i32::try_from(workload.records / 2)?;
    let mut scan = storage.open_scan(name)?;
    scan.start_scan(
        0,
        KEY_SIZE,
        Datatype::Integer,
        Some(&threshold.to_le_bytes()),
        Operator::Gte,
    )?;
    let mut matched = 0;
    while scan.scan_next()?.is_some() {
        matched += 1;
    }
    scan.close()?;
    info!(file = name, threshold, matched, "scan finished");

    storage.flush_all()?;

    Ok(WorkloadReport {
        inserted: workload.records,
        rec_cnt: header.rec_cnt,
        page_cnt: header.page_cnt,
        matched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use file::in_memory_file_manager::InMemoryFileManager;
    use std::sync::Arc;

    fn workload(records: u32) -> WorkloadConfig {
        WorkloadConfig {
            file_name: "w.tbl".to_string(),
            records,
            record_size: 64,
        }
    }

    #[test]
    fn build_record_pads_after_the_key() {
        let record = build_record(7, 10);

        assert_eq!(record.len(), 10);
        assert_eq!(&record[..4], &7i32.to_le_bytes());
        assert!(record[4..].iter().all(|b| *b == b'.'));
    }

    #[test]
    fn run_counts_the_upper_half() {
        let storage = StorageManager::with_pool_size(Arc::new(InMemoryFileManager::default()), 8);

        let report = run(&storage, &workload(200)).unwrap();

        assert_eq!(report.rec_cnt, 200);
        assert_eq!(report.matched, 100);
        // 64 byte records plus a 4 byte slot: 58 per page.
        assert_eq!(report.page_cnt, 4);
    }

    #[test]
    fn second_run_appends_to_the_same_file() {
        let storage = StorageManager::with_pool_size(Arc::new(InMemoryFileManager::default()), 8);
        run(&storage, &workload(10)).unwrap();

        let report = run(&storage, &workload(10)).unwrap();

        assert_eq!(report.rec_cnt, 20);
        // Keys 5..10 from both runs.
        assert_eq!(report.matched, 10);
    }
}
