//! String key-value persistence in the shape of browser local storage.

use std::{
    collections::BTreeMap,
    env, fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::StorageError;

/// Key under which the form values are saved.
pub const STORAGE_KEY: &str = "mortgageCalculatorValues";

pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// All items live in a single JSON object file. The file is re-read on every
/// access so edits made by another session are picked up.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every later save.
        let mut items = match self.read_items() {
            Err(StorageError::Corrupt { .. }) => BTreeMap::new(),
            other => other?,
        };
        items.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&items)?;

        let write_error = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&self.path, content).map_err(write_error)?;
        debug!(path = %self.path.display(), key, "storage item written");
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/mortgage-calculator/storage.json`, then the same under
/// `$HOME/.config`, then a file in the working directory.
pub fn default_storage_path() -> PathBuf {
    let config_dir = env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        });
    match config_dir {
        Some(dir) => dir.join("mortgage-calculator").join("storage.json"),
        None => PathBuf::from("mortgage-calculator.json"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        env::temp_dir()
            .join(format!("mortgage-calculator-storage-{}-{n}", std::process::id()))
            .join(name)
    }

    #[test]
    fn memory_storage_round_trips_items() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);

        storage.set_item(STORAGE_KEY, "{}").unwrap();
        storage.set_item(STORAGE_KEY, "{\"a\":1}").unwrap();

        assert_eq!(
            storage.get_item(STORAGE_KEY).unwrap().as_deref(),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let storage = FileStorage::new(scratch_path("absent.json"));

        assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn file_storage_creates_parent_and_persists() {
        let path = scratch_path("nested/storage.json");
        let mut storage = FileStorage::new(&path);
        storage.set_item(STORAGE_KEY, "value").unwrap();
        storage.set_item("other", "x").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get_item(STORAGE_KEY).unwrap().as_deref(),
            Some("value")
        );
        assert_eq!(reopened.get_item("other").unwrap().as_deref(), Some("x"));

        fs::remove_dir_all(path.parent().unwrap().parent().unwrap()).ok();
    }

    #[test]
    fn corrupt_file_reports_error_then_is_replaced() {
        let path = scratch_path("corrupt.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item(STORAGE_KEY),
            Err(StorageError::Corrupt { .. })
        ));

        storage.set_item(STORAGE_KEY, "fresh").unwrap();
        assert_eq!(
            storage.get_item(STORAGE_KEY).unwrap().as_deref(),
            Some("fresh")
        );

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
