use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::AuthError;

/// Process-wide string store shared by the credential store and the mock backend.
///
/// Writes are visible to every holder immediately. None of the operations fail
/// from the caller's point of view.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}

/// Write-through JSON file store. The in-memory map stays authoritative when a
/// write to disk fails.
pub struct FileStore {
    path: PathBuf,
    entries: DashMap<String, String>,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn open(dir: &Path) -> Result<Self, AuthError> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                AuthError::Storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        let path = dir.join("storage.json");
        let mut entries = DashMap::new();
        if path.exists() {
            let json = fs::read_to_string(&path)
                .map_err(|e| AuthError::Storage(format!("Failed to read storage: {}", e)))?;
            let stored: BTreeMap<String, String> = serde_json::from_str(&json)?;
            entries.extend(stored);
        }

        tracing::debug!(path = %path.display(), "Opened file store");

        Ok(Self {
            path,
            entries,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = self.write_snapshot() {
            tracing::warn!(path = %self.path.display(), "Failed to persist storage: {}", e);
        }
    }

    fn write_snapshot(&self) -> Result<(), AuthError> {
        let snapshot: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let json = serde_json::to_string_pretty(&snapshot)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // The file holds the session token: owner read/write only, from the
        // moment it is created
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // `mode` only applies on creation; tighten a file left by an older run
        // before any content lands in it
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k");
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("token", "abc");
            store.set("mock_notes", "[]");
            store.remove("mock_notes");
        }

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
        assert_eq!(reopened.get("mock_notes"), None);
    }

    #[test]
    fn test_file_store_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        store.set("k", "v");
        assert!(store.path().exists());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("storage.json"), "not json").unwrap();
        assert!(matches!(
            FileStore::open(dir.path()),
            Err(AuthError::Json(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("token", "secret");
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_file_store_loads_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("storage.json"),
            r#"{"token":"abc","mock_notes":"[]"}"#,
        )
        .unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("token").as_deref(), Some("abc"));
        assert_eq!(store.get("mock_notes").as_deref(), Some("[]"));

        store.set("other", "x");
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
        assert_eq!(reopened.get("other").as_deref(), Some("x"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        store.set("token", "secret");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
