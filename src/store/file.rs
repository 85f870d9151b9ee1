//! JSON-file-backed session store.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::error::StoreError;
use crate::port::KeyValueStore;

/// Durable key-value store persisted as a small JSON object.
///
/// Holds the handful of session values (push token, user id, registration
/// marker). Every mutation is flushed through a temp-file rename so a crash
/// mid-write never leaves a torn file.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(StoreError::Malformed)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::Read(e)),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("arbfeed")
            .join("session.json")
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::Write)?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(StoreError::Malformed)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(StoreError::Write)?;
        fs::rename(&tmp, &self.path).map_err(StoreError::Write)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.put("fcm_token", "tok-1").unwrap();
        store.put("user_id", "u1").unwrap();
        drop(store);

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("fcm_token").unwrap().as_deref(), Some("tok-1"));
        assert_eq!(store.get("user_id").unwrap().as_deref(), Some("u1"));
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn remove_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.put("fcm_token", "tok-1").unwrap();
        store.remove("fcm_token").unwrap();
        drop(store);

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("fcm_token").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StoreError::Malformed(_))
        ));
    }
}
