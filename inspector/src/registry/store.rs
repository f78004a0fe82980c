use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, PoisonError, RwLock,
    },
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Io(#[from] io::Error),
    #[error("Storage is corrupted: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Small durable string-to-string storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}

/// Keeps every entry in a single JSON object on disk.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;

        log::debug!("wrote {key} to {}", self.path.display());

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{FileStore, KeyValueStore, StoreError};
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "wallet-inspector-{name}-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        path
    }

    #[test]
    fn file_store_persists_between_instances() {
        let path = temp_path("persist");

        assert_eq!(FileStore::new(&path).get("k").unwrap(), None);

        FileStore::new(&path).set("k", "a,b").unwrap();
        FileStore::new(&path).set("other", "c").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("k").unwrap(), Some("a,b".into()));
        assert_eq!(store.get("other").unwrap(), Some("c".into()));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupted_file_is_reported() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStore::new(&path).get("k"),
            Err(StoreError::Serde(_))
        ));

        fs::remove_file(&path).unwrap();
    }
}
