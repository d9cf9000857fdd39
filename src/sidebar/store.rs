//! Persistence backends for the module registry.
//!
//! A store only moves plain module records in and out of some medium. The
//! registry owns the in-memory copy and decides when to save.

use super::module::SidebarModule;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid module data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Backend that persists the module list.
pub trait ModuleStore {
    /// Read the saved modules. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<SidebarModule>>, StoreError>;

    /// Replace the saved modules.
    fn save(&self, modules: &[SidebarModule]) -> Result<(), StoreError>;
}

/// Store that keeps modules in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<Vec<SidebarModule>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `modules`.
    pub fn with_modules(modules: Vec<SidebarModule>) -> Self {
        Self {
            saved: Mutex::new(Some(modules)),
        }
    }

    /// Copy of what was last saved.
    pub fn snapshot(&self) -> Option<Vec<SidebarModule>> {
        self.saved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ModuleStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<SidebarModule>>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, modules: &[SidebarModule]) -> Result<(), StoreError> {
        *self
            .saved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(modules.to_vec());
        Ok(())
    }
}

/// Store that keeps modules as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModuleStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<SidebarModule>>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, modules: &[SidebarModule]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(modules)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidebar::module::default_modules;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn memory_store_starts_empty() {
        assert_eq!(MemoryStore::new().load().unwrap(), None);
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let store = MemoryStore::new();
        store.save(&default_modules()).unwrap();
        assert_eq!(store.load().unwrap(), Some(default_modules()));
    }

    #[test]
    fn file_store_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("modules.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("state/modules.json"));
        store.save(&default_modules()).unwrap();
        assert_eq!(store.load().unwrap(), Some(default_modules()));
    }

    #[test]
    fn file_store_corrupt_json_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("modules.json");
        fs::write(&path, "not json").unwrap();
        let result = JsonFileStore::new(&path).load();
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}
