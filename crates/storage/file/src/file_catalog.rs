//! A file catalog mapping file names to the `FileId`s used in page identifiers

use crate::errors::FileError;
use page::page_id::FileId;
use std::collections::HashMap;
use std::sync::RwLock;

/// Catalog holding the mappings between file names and their `FileId`, plus how many handles
/// are currently open on each file.
///
/// Ids are handed out from a counter starting at 1 and never reused, so pages of a destroyed
/// file can never be mistaken for pages of a later file with the same name.
#[derive(Debug)]
pub struct FileCatalog {
    state: RwLock<CatalogState>,
}

#[derive(Debug)]
struct CatalogState {
    next_file_id: FileId,
    by_name: HashMap<String, FileId>,
    entries: HashMap<FileId, CatalogEntry>,
}

#[derive(Debug)]
struct CatalogEntry {
    name: String,
    open_count: u32,
}

impl Default for FileCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FileCatalog {
    /// Creates a new empty `FileCatalog`
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState {
                next_file_id: 1,
                by_name: HashMap::new(),
                entries: HashMap::new(),
            }),
        }
    }

    /// Assigns a fresh `FileId` to `name`.
    pub fn register(&self, name: &str) -> Result<FileId, FileError> {
        let mut state = self
            .state
            .write()
            .expect("FileCatalog poisoned: another thread panicked while holding the lock");

        if state.by_name.contains_key(name) {
            return Err(FileError::AlreadyExists(name.to_string()));
        }

        let file_id = state.next_file_id;
        state.next_file_id += 1;
        state.by_name.insert(name.to_string(), file_id);
        state.entries.insert(
            file_id,
            CatalogEntry {
                name: name.to_string(),
                open_count: 0,
            },
        );

        Ok(file_id)
    }

    /// Resolves a file name to its id.
    pub fn lookup(&self, name: &str) -> Option<FileId> {
        let state = self
            .state
            .read()
            .expect("FileCatalog poisoned: another thread panicked while holding the lock");
        state.by_name.get(name).copied()
    }

    /// Resolves a `file_id` to its file name.
    pub fn file_name(&self, file_id: FileId) -> Option<String> {
        let state = self
            .state
            .read()
            .expect("FileCatalog poisoned: another thread panicked while holding the lock");
        state.entries.get(&file_id).map(|entry| entry.name.clone())
    }

    /// Number of open handles on the file, `None` for unknown ids.
    pub fn open_count(&self, file_id: FileId) -> Option<u32> {
        let state = self
            .state
            .read()
            .expect("FileCatalog poisoned: another thread panicked while holding the lock");
        state.entries.get(&file_id).map(|entry| entry.open_count)
    }

    /// Records a new open handle and returns the updated count.
    pub(crate) fn mark_open(&self, file_id: FileId) -> Result<u32, FileError> {
        let mut state = self
            .state
            .write()
            .expect("FileCatalog poisoned: another thread panicked while holding the lock");
        let entry = state
            .entries
            .get_mut(&file_id)
            .ok_or(FileError::UnknownFile(file_id))?;
        entry.open_count += 1;
        Ok(entry.open_count)
    }

    /// Records a closed handle and returns the updated count.
    pub(crate) fn mark_closed(&self, file_id: FileId) -> Result<u32, FileError> {
        let mut state = self
            .state
            .write()
            .expect("FileCatalog poisoned: another thread panicked while holding the lock");
        let entry = state
            .entries
            .get_mut(&file_id)
            .ok_or(FileError::UnknownFile(file_id))?;
        if entry.open_count == 0 {
            return Err(FileError::NotOpen(file_id));
        }
        entry.open_count -= 1;
        Ok(entry.open_count)
    }

    /// Drops the mapping for `name`. Fails while the file has open handles.
    pub(crate) fn unregister(&self, name: &str) -> Result<FileId, FileError> {
        let mut state = self
            .state
            .write()
            .expect("FileCatalog poisoned: another thread panicked while holding the lock");
        let file_id = *state
            .by_name
            .get(name)
            .ok_or_else(|| FileError::NotFound(name.to_string()))?;

        if state
            .entries
            .get(&file_id)
            .is_some_and(|entry| entry.open_count > 0)
        {
            return Err(FileError::StillOpen(name.to_string()));
        }

        state.by_name.remove(name);
        state.entries.remove(&file_id);
        Ok(file_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_hands_out_increasing_ids() {
        let catalog = FileCatalog::new();

        let first = catalog.register("a.tbl").unwrap();
        let second = catalog.register("b.tbl").unwrap();

        assert_eq!((first, second), (1, 2));
        assert_eq!(catalog.lookup("b.tbl"), Some(2));
        assert_eq!(catalog.file_name(1).as_deref(), Some("a.tbl"));
    }

    #[test]
    fn register_twice_is_already_exists() {
        let catalog = FileCatalog::new();
        catalog.register("a.tbl").unwrap();

        assert!(matches!(
            catalog.register("a.tbl"),
            Err(FileError::AlreadyExists(name)) if name == "a.tbl"
        ));
    }

    #[test]
    fn open_counts_track_handles() {
        let catalog = FileCatalog::new();
        let id = catalog.register("a.tbl").unwrap();

        assert_eq!(catalog.mark_open(id).unwrap(), 1);
        assert_eq!(catalog.mark_open(id).unwrap(), 2);
        assert_eq!(catalog.mark_closed(id).unwrap(), 1);
        assert_eq!(catalog.open_count(id), Some(1));
    }

    #[test]
    fn closing_a_file_that_is_not_open_fails() {
        let catalog = FileCatalog::new();
        let id = catalog.register("a.tbl").unwrap();

        assert!(matches!(catalog.mark_closed(id), Err(FileError::NotOpen(1))));
    }

    #[test]
    fn unregister_refuses_open_files() {
        let catalog = FileCatalog::new();
        let id = catalog.register("a.tbl").unwrap();
        catalog.mark_open(id).unwrap();

        assert!(matches!(
            catalog.unregister("a.tbl"),
            Err(FileError::StillOpen(_))
        ));

        catalog.mark_closed(id).unwrap();
        assert_eq!(catalog.unregister("a.tbl").unwrap(), id);
        assert_eq!(catalog.lookup("a.tbl"), None);
    }

    #[test]
    fn ids_are_not_reused_after_unregister() {
        let catalog = FileCatalog::new();
        catalog.register("a.tbl").unwrap();
        catalog.unregister("a.tbl").unwrap();

        assert_eq!(catalog.register("a.tbl").unwrap(), 2);
    }
}
