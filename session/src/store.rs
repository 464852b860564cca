use std::collections::HashMap;
use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;

use serde_json::Map as JsonMap;
use serde_json::Value;

use crate::error::StoreError;

pub const ACCESS_TOKEN_KEY: &str = "cinema.access_token";
pub const REFRESH_TOKEN_KEY: &str = "cinema.refresh_token";
pub const SESSION_FILENAME: &str = "session.json";

/// Durable key/value storage for session tokens.
pub trait TokenStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Stores tokens in a single JSON object file, 0600 on Unix. A missing file
/// reads as empty.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<home>/session.json`.
    pub fn in_home(home: &Path) -> Self {
        Self::new(home.join(SESSION_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<JsonMap<String, Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(JsonMap::new()),
            Ok(contents) => match serde_json::from_str(&contents)? {
                Value::Object(map) => Ok(map),
                _ => Ok(JsonMap::new()),
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(JsonMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_map(&self, map: JsonMap<String, Value>) -> Result<(), StoreError> {
        if map.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err.into()),
            };
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&Value::Object(map))?;
        let mut options = fs::OpenOptions::new();
        options.truncate(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(payload.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let map = self.read_map()?;
        Ok(match map.get(key) {
            Some(Value::String(value)) if !value.is_empty() => Some(value.clone()),
            _ => None,
        })
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(map)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(map)
    }
}

/// Process-local store for tests and one-shot commands.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_empty() {
        let home = tempdir().expect("tempdir");
        let store = FileTokenStore::in_home(home.path());

        assert_eq!(store.load(ACCESS_TOKEN_KEY).expect("load"), None);
    }

    #[test]
    fn save_creates_parent_and_round_trips() {
        let home = tempdir().expect("tempdir");
        let store = FileTokenStore::in_home(&home.path().join("nested").join(".cinema"));

        store.save(ACCESS_TOKEN_KEY, "access-1").expect("save access");
        store.save(REFRESH_TOKEN_KEY, "refresh-1").expect("save refresh");

        let reopened = FileTokenStore::new(store.path().to_path_buf());
        assert_eq!(
            reopened.load(ACCESS_TOKEN_KEY).expect("load"),
            Some("access-1".to_string())
        );
        assert_eq!(
            reopened.load(REFRESH_TOKEN_KEY).expect("load"),
            Some("refresh-1".to_string())
        );
    }

    #[test]
    fn removing_last_key_deletes_the_file() {
        let home = tempdir().expect("tempdir");
        let store = FileTokenStore::in_home(home.path());
        store.save(ACCESS_TOKEN_KEY, "access-1").expect("save");

        store.remove(ACCESS_TOKEN_KEY).expect("remove");
        store.remove(REFRESH_TOKEN_KEY).expect("remove absent key");

        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let home = tempdir().expect("tempdir");
        let store = FileTokenStore::in_home(home.path());
        fs::write(store.path(), "{not json").expect("write");

        let err = store.load(ACCESS_TOKEN_KEY).expect_err("corrupt file");

        assert!(matches!(err, StoreError::Json(_)));
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let home = tempdir().expect("tempdir");
        let store = FileTokenStore::in_home(home.path());
        store.save(ACCESS_TOKEN_KEY, "access-1").expect("save");

        let mode = fs::metadata(store.path()).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
