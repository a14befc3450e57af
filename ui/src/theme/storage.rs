//! Durable key-value storage for the theme record.
//!
//! Mirrors origin-scoped browser storage: synchronous, string values only,
//! one namespace per profile.

use crate::theme::errors::{ThemeError, ThemeResult};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub trait KeyValueStore: Send {
    fn get_item(&self, key: &str) -> ThemeResult<Option<String>>;

    /// Stores `value` under `key`, replacing any prior value.
    fn set_item(&mut self, key: &str, value: &str) -> ThemeResult<()>;

    fn remove_item(&mut self, key: &str) -> ThemeResult<()>;
}

/// In-process storage. Clones share the same map, so a caller can keep a
/// handle to inspect what the store wrote.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one entry, as if written by an earlier session.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::default();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        storage
    }

    /// Number of successful `set_item` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> ThemeResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|e| ThemeError::Storage(format!("storage lock poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> ThemeResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> ThemeResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> ThemeResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Storage persisted as a single JSON object in `storage.json`.
///
/// Each write rewrites the whole file through a temporary file and a rename,
/// so a crash never leaves a half-written record behind.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub const FILE_NAME: &'static str = "storage.json";

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ThemeResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            ThemeError::Storage(format!(
                "Failed to read storage file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            ThemeError::Storage(format!(
                "Storage file '{}' is corrupted: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> ThemeResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ThemeError::Storage(format!(
                    "Failed to create storage directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(items)
            .map_err(|e| ThemeError::Serialize(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(|e| {
            ThemeError::Storage(format!(
                "Failed to write storage file '{}': {}",
                tmp_path.display(),
                e
            ))
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            ThemeError::Storage(format!(
                "Failed to replace storage file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> ThemeResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> ThemeResult<()> {
        // A corrupted file is replaced rather than blocking every later write
        let mut items = self.read_all().unwrap_or_else(|e| {
            log::warn!("{e}; starting from empty storage");
            BTreeMap::new()
        });
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> ThemeResult<()> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}
