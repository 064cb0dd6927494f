//! File-backed key-value store with versioned envelopes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Current on-disk schema version. Entries written with a different version
/// read back as absent, forcing a refresh instead of a bad deserialization.
pub const CACHE_VERSION: u32 = 1;

/// Cache key holding the serialized document collection.
pub const DOCUMENTS_KEY: &str = "paychecks";

/// Cache key holding the last-viewed year.
pub const SELECTED_YEAR_KEY: &str = "selected_year";

/// Versioned wrapper around every persisted value.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    value: T,
}

/// A string-keyed persistent store of serialized values.
///
/// Each key maps to one JSON file under the store's directory. Values are
/// wrapped in a `{ version, value }` envelope; a version mismatch is treated
/// as a missing entry.
///
/// # Example
///
/// ```no_run
/// use stv_paydocs::cache::{CacheStore, SELECTED_YEAR_KEY};
///
/// let store = CacheStore::open("./cache")?;
/// store.put(SELECTED_YEAR_KEY, &"2025".to_string())?;
/// let year: Option<String> = store.get(SELECTED_YEAR_KEY)?;
/// assert_eq!(year.as_deref(), Some("2025"));
/// # Ok::<(), stv_paydocs::error::ServiceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Opens (and creates, if needed) a store rooted at the given directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> ServiceResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| ServiceError::Cache {
            key: dir.display().to_string(),
            message: format!("failed to create cache directory: {}", e),
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Reads and deserializes the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent or was written with a
    /// different schema version.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> ServiceResult<Option<T>> {
        let path = self.path_for(key);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ServiceError::Cache {
                    key: key.to_string(),
                    message: e.to_string(),
                });
            }
        };

        let envelope: Envelope<T> =
            serde_json::from_str(&content).map_err(|e| ServiceError::Cache {
                key: key.to_string(),
                message: format!("corrupt cache entry: {}", e),
            })?;

        if envelope.version != CACHE_VERSION {
            return Ok(None);
        }
        Ok(Some(envelope.value))
    }

    /// Serializes and stores `value` under `key`, replacing any prior entry.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> ServiceResult<()> {
        let envelope = Envelope {
            version: CACHE_VERSION,
            value,
        };
        let content = serde_json::to_string(&envelope).map_err(|e| ServiceError::Cache {
            key: key.to_string(),
            message: format!("failed to serialize value: {}", e),
        })?;
        fs::write(self.path_for(key), content).map_err(|e| ServiceError::Cache {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Removes the entry stored under `key`, if any.
    pub fn remove(&self, key: &str) -> ServiceResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::Cache {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentKind, PayrollDocument, Period};
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> CacheStore {
        CacheStore::open(dir.path()).unwrap()
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let value: Option<String> = store.get("absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_put_then_get_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.put(SELECTED_YEAR_KEY, &"2024".to_string()).unwrap();
        let value: Option<String> = store.get(SELECTED_YEAR_KEY).unwrap();
        assert_eq!(value.as_deref(), Some("2024"));
    }

    #[test]
    fn test_put_replaces_prior_entry() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.put(SELECTED_YEAR_KEY, &"2023".to_string()).unwrap();
        store.put(SELECTED_YEAR_KEY, &"2024".to_string()).unwrap();
        let value: Option<String> = store.get(SELECTED_YEAR_KEY).unwrap();
        assert_eq!(value.as_deref(), Some("2024"));
    }

    #[test]
    fn test_remove_deletes_entry() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.put("key", &1u32).unwrap();
        store.remove("key").unwrap();
        let value: Option<u32> = store.get("key").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.remove("never-written").is_ok());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_store(&dir);
            store.put(SELECTED_YEAR_KEY, &"2022".to_string()).unwrap();
        }
        let store = CacheStore::open(dir.path()).unwrap();
        let value: Option<String> = store.get(SELECTED_YEAR_KEY).unwrap();
        assert_eq!(value.as_deref(), Some("2022"));
    }

    #[test]
    fn test_version_mismatch_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let stale = r#"{"version":0,"value":"2020"}"#;
        std::fs::write(dir.path().join("selected_year.json"), stale).unwrap();

        let value: Option<String> = store.get(SELECTED_YEAR_KEY).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_corrupt_entry_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        std::fs::write(dir.path().join("paychecks.json"), "not json").unwrap();

        let result: ServiceResult<Option<Vec<PayrollDocument>>> = store.get(DOCUMENTS_KEY);
        assert!(matches!(result, Err(ServiceError::Cache { .. })));
    }

    #[test]
    fn test_document_collection_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let docs = vec![
            PayrollDocument::new(
                DocumentKind::Regular,
                Period::new(2024, 1),
                "<html>jan</html>".to_string(),
            ),
            PayrollDocument::new(
                DocumentKind::BonusFirst,
                Period::new(2024, 11),
                "<html>13-1</html>".to_string(),
            ),
        ];
        store.put(DOCUMENTS_KEY, &docs).unwrap();

        let back: Option<Vec<PayrollDocument>> = store.get(DOCUMENTS_KEY).unwrap();
        assert_eq!(back.unwrap(), docs);
    }
}
