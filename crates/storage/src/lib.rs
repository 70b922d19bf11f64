//! Origin-scoped durable key-value storage.
//!
//! The session layer only ever needs string keys and string values, so the
//! backends here expose exactly that. Every backend is synchronous and may
//! fail; callers decide whether a failure matters.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const MEMORY_LOCATION: &str = "memory:";
pub const UNAVAILABLE_LOCATION: &str = "unavailable:";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage i/o failure at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt storage document at '{}': {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = StorageError> = std::result::Result<T, E>;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Opens a store from a location string.
///
/// `memory:` gives a process-local store, `unavailable:` a store whose every
/// access fails, anything else is a directory holding one document per origin.
pub fn open(location: &str, origin: &str) -> Result<Arc<dyn KeyValueStore>> {
    let location = location.trim();
    match location {
        MEMORY_LOCATION => Ok(Arc::new(MemoryStore::default())),
        UNAVAILABLE_LOCATION => Ok(Arc::new(UnavailableStore::new(
            "storage disabled by configuration",
        ))),
        "" => Err(StorageError::Unavailable("empty storage location".into())),
        dir => Ok(Arc::new(FileStore::open(dir, origin)?)),
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Stand-in for storage that has been disabled or is blocked.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(StorageError::Unavailable(self.reason.clone()))
    }
}

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        self.fail()
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        self.fail()
    }

    fn remove(&self, _key: &str) -> Result<()> {
        self.fail()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct OriginDocument {
    origin: String,
    #[serde(default)]
    entries: BTreeMap<String, StoredEntry>,
}

/// One JSON document per origin inside a data directory.
#[derive(Debug)]
pub struct FileStore {
    origin: String,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn open(dir: impl AsRef<Path>, origin: &str) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("{}.json", origin_file_stem(origin)));
        debug!(origin, path = %path.display(), "opened origin storage");
        Ok(Self {
            origin: origin.to_string(),
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn read_document(&self) -> Result<OriginDocument> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(OriginDocument {
                    origin: self.origin.clone(),
                    entries: BTreeMap::new(),
                });
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_document(&self, document: &OriginDocument) -> Result<()> {
        let body = serde_json::to_string_pretty(document).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, body).map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn update(&self, apply: impl FnOnce(&mut OriginDocument)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("file store lock poisoned".into()))?;
        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(StorageError::Corrupt { path, source }) => {
                warn!(path = %path.display(), error = %source, "replacing corrupt storage document");
                OriginDocument {
                    origin: self.origin.clone(),
                    entries: BTreeMap::new(),
                }
            }
            Err(err) => return Err(err),
        };
        apply(&mut document);
        self.write_document(&document)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read_document()?
            .entries
            .get(key)
            .map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|document| {
            document.entries.insert(
                key.to_string(),
                StoredEntry {
                    value: value.to_string(),
                    updated_at: Utc::now(),
                },
            );
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|document| {
            document.entries.remove(key);
        })
    }
}

fn origin_file_stem(origin: &str) -> String {
    let stem: String = origin
        .trim()
        .trim_end_matches('/')
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let stem = stem.trim_matches(|c| c == '_' || c == '.').to_string();
    if stem.is_empty() {
        "default".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
