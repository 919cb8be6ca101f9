//! The `file` crate is responsible for the interaction between the engine and the file system.
//! It names files, hands out `FileId`s for them, and reads, writes and appends whole pages.

pub mod api;

/// Errors reported by file managers and the catalog.
pub mod errors;

pub mod file_catalog;

/// The actual disk based file manager
pub mod disk_file_manager;

/// A file manager keeping every page in memory, for tests and throwaway databases.
pub mod in_memory_file_manager;
