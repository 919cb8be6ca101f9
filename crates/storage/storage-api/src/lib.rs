//! Entry point to the storage layer: one [`storage_manager::StorageManager`] bundles the file
//! manager and the buffer pool every heap file session runs against.

pub mod storage_manager;
