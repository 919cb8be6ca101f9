use crate::config::EngineConfig;
use buffer::buffer::BufferManager;
use file::disk_file_manager::DiskFileManager;
use file::file_catalog::FileCatalog;
use std::sync::Arc;
use storage_api::storage_manager::StorageManager;
use tracing::info;

/// Owner of the singleton-like instances that are needed for the entire lifetime of the process
#[derive(Debug)]
pub struct EngineEnvironment {
    pub storage: StorageManager<DiskFileManager>,
    pub engine_config: EngineConfig,
}

impl EngineEnvironment {
    pub fn new(config: EngineConfig) -> Self {
        let file_catalog = Arc::new(FileCatalog::new());
        let file_manager = Arc::new(DiskFileManager::new(
            config.storage.data_dir.clone(),
            file_catalog,
        ));
        let buffer = Arc::new(BufferManager::new(
            Arc::clone(&file_manager),
            config.storage.buffer_pages.get(),
        ));
        let storage = StorageManager::new(file_manager, buffer);

        info!(
            data_dir = %config.storage.data_dir.display(),
            buffer_pages = config.storage.buffer_pages.get(),
            "engine environment ready"
        );

        Self {
            storage,
            engine_config: config,
        }
    }
}
