use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

/// Error type for key-value persistence
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("could not access stored document '{key}': {source}")]
    Io { key: String, source: io::Error },
    #[error("stored document '{key}' is malformed: {source}")]
    Malformed {
        key: String,
        source: serde_json::Error,
    },
    #[error("could not serialize document '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    #[error("store rejected write to '{key}'")]
    Rejected { key: String },
}

/// The external store the entity collections round-trip through.
///
/// One serialized document per key; `persist` replaces the whole document.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn persist(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// Load and decode the document under `key`, if any
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, PersistError> {
    let Some(text) = store.load(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&text).map_err(|source| PersistError::Malformed {
        key: key.to_string(),
        source,
    })?;
    Ok(Some(value))
}

/// Encode `value` and write it under `key`
pub fn persist_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| PersistError::Serialize {
        key: key.to_string(),
        source,
    })?;
    tracing::debug!(key, bytes = text.len(), "persisting document");
    store.persist(key, &text)
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Volatile store, used in tests and for dry runs
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    docs: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `persist` fail with `PersistError::Rejected`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.docs.get(key).cloned())
    }

    fn persist(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        if self.fail_writes {
            return Err(PersistError::Rejected {
                key: key.to_string(),
            });
        }
        self.docs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self, PersistError> {
        fs::create_dir_all(dir).map_err(|source| PersistError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(FileStore {
            dir: dir.to_path_buf(),
        })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn persist(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        atomic_write(&self.path_for(key), value.as_bytes()).map_err(|source| PersistError::Io {
            key: key.to_string(),
            source,
        })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        persist_json(&mut store, "nums", &vec![1, 2, 3]).unwrap();
        let back: Option<Vec<u32>> = load_json(&store, "nums").unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[test]
    fn memory_store_missing_key_is_none() {
        let store = MemoryStore::new();
        let back: Option<Vec<u32>> = load_json(&store, "nothing").unwrap();
        assert!(back.is_none());
    }

    #[test]
    fn memory_store_can_reject_writes() {
        let mut store = MemoryStore::new();
        store.set_fail_writes(true);
        let err = persist_json(&mut store, "k", &1).unwrap_err();
        assert!(matches!(err, PersistError::Rejected { .. }));
        assert!(store.load("k").unwrap().is_none());
    }

    #[test]
    fn malformed_document_names_key() {
        let mut store = MemoryStore::new();
        store.persist("tasks", "not json {{{").unwrap();
        let err = load_json::<Vec<u32>>(&store, "tasks").unwrap_err();
        assert!(matches!(err, PersistError::Malformed { ref key, .. } if key == "tasks"));
        assert!(err.to_string().contains("tasks"));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::open(&dir.path().join("data")).unwrap();
        persist_json(&mut store, "expenses", &vec!["a", "b"]).unwrap();
        assert!(store.path_for("expenses").exists());

        let reopened = FileStore::open(&dir.path().join("data")).unwrap();
        let back: Option<Vec<String>> = load_json(&reopened, "expenses").unwrap();
        assert_eq!(back, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn file_store_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.load("tasks").unwrap().is_none());
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
