//! String key-value backends.
//!
//! The store only needs `get` and `set` on string values, the same contract
//! as browser local storage. Two implementations are provided: an in-memory
//! map with an optional quota, and a directory holding one file per key.

use crate::error::{BackendError, BackendResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Synchronous string key-value storage.
pub trait KeyValueBackend {
    /// Read the value stored under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> BackendResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> BackendResult<()>;
}

/// In-memory backend.
///
/// An optional quota bounds the total size of stored keys and values in
/// bytes, mimicking the per-origin limit of browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Create an empty backend without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit total stored bytes to `quota`.
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Total bytes currently stored (keys and values).
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> BackendResult<()> {
        if let Some(quota) = self.quota {
            let previous = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let needed = self.used_bytes() - previous + key.len() + value.len();
            if needed > quota {
                return Err(BackendError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open a backend rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> BackendResult<Self> {
        let dir = dir.into();

        fs::create_dir_all(&dir).map_err(|e| BackendError::Write {
            key: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { dir })
    }

    /// Directory holding the key files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the file path for a key.
    fn key_file(&self, key: &str) -> BackendResult<PathBuf> {
        if key.is_empty()
            || key == "."
            || key.contains("..")
            || key.contains(['/', '\\'])
            || key.contains('\0')
        {
            return Err(BackendError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        let file = self.key_file(key)?;

        match fs::read_to_string(&file) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackendError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> BackendResult<()> {
        let file = self.key_file(key)?;

        fs::write(&file, value).map_err(|e| BackendError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.get("k").unwrap(), None);

        backend.set("k", "v1").unwrap();
        backend.set("k", "v2").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(backend.used_bytes(), 3);
    }

    #[test]
    fn test_memory_backend_quota() {
        let mut backend = MemoryBackend::new().with_quota(10);
        backend.set("k", "123456789").unwrap();

        // Replacing a value only counts the new size.
        backend.set("k", "abcdefghi").unwrap();

        let err = backend.set("k", "0123456789").unwrap_err();
        assert!(matches!(err, BackendError::QuotaExceeded { needed: 11, quota: 10, .. }));
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("abcdefghi"));
    }

    #[test]
    fn test_file_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path().join("kv")).unwrap();

        assert_eq!(backend.get("saved-scans").unwrap(), None);
        backend.set("saved-scans", "[]").unwrap();
        assert_eq!(backend.get("saved-scans").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("kv").join("saved-scans.json").exists());
    }

    #[test]
    fn test_file_backend_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", "a\\b"] {
            assert!(matches!(backend.set(key, "x"), Err(BackendError::InvalidKey(_))));
            assert!(matches!(backend.get(key), Err(BackendError::InvalidKey(_))));
        }
    }
}
