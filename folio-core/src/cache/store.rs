//! String key-value stores behind the book cache

use super::CacheResult;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A localStorage-like store: string keys, string values, insertion ordered
pub trait KeyValueStore {
    /// All keys, in insertion order
    fn keys(&self) -> Vec<String>;

    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Option<String>;

    /// Check if a key exists
    fn contains_key(&self, key: &str) -> bool;

    /// Store `value` under `key`
    fn set_item(&mut self, key: &str, value: String) -> CacheResult<()>;

    /// Remove every entry
    fn clear(&mut self) -> CacheResult<()>;
}

/// In-memory store (for testing and ephemeral sessions)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: Map<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    fn set_item(&mut self, key: &str, value: String) -> CacheResult<()> {
        self.items.insert(key.to_string(), Value::String(value));
        Ok(())
    }

    fn clear(&mut self) -> CacheResult<()> {
        self.items.clear();
        Ok(())
    }
}

/// Store persisted as a single JSON object file
///
/// The whole file is loaded on open and rewritten after every mutation.
/// A failed write leaves the in-memory view as it was before the call.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: Map<String, Value>,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> CacheResult<Self> {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(data) if data.trim().is_empty() => Map::new(),
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Opened cache file {} ({} entries)", path.display(), items.len());
        Ok(Self { path, items })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a temp file then rename to avoid partial writes
    fn save(&self) -> CacheResult<()> {
        let data = serde_json::to_string_pretty(&self.items)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        std::fs::write(&temp_path, data)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    fn set_item(&mut self, key: &str, value: String) -> CacheResult<()> {
        let previous = self.items.insert(key.to_string(), Value::String(value));

        if let Err(e) = self.save() {
            match previous {
                Some(old) => {
                    self.items.insert(key.to_string(), old);
                }
                None => {
                    self.items.remove(key);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn clear(&mut self) -> CacheResult<()> {
        let previous = std::mem::take(&mut self.items);

        if let Err(e) = self.save() {
            self.items = previous;
            return Err(e);
        }
        Ok(())
    }
}
