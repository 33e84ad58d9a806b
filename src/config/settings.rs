//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration and data.

use crate::error::{ConfigError, ConfigResult};
use crate::storage::{
    Retention, DEFAULT_RETENTION_MONTHS, DEFAULT_STORAGE_KEY, MAX_RETENTION_MONTHS,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/scanshelf)
    pub config_dir: PathBuf,
    /// Data directory (~/.local/share/scanshelf)
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using XDG directories.
    ///
    /// Nothing is created on disk here; the settings file and the storage
    /// directory create their own parents when written.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "scanshelf", "scanshelf")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
            data_dir: project.data_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Get the path to the key-value storage directory.
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }
}

/// Settings for the scan store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Key the scan collection is stored under.
    pub storage_key: String,
    /// How many 30-day months scans are kept.
    pub retention_months: u32,
    /// Override for the key-value storage directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            retention_months: DEFAULT_RETENTION_MONTHS,
            data_dir: None,
        }
    }
}

impl StoreSettings {
    /// Load settings from the default location, falling back to defaults
    /// when no settings file exists.
    pub fn load(paths: &Paths) -> ConfigResult<Self> {
        let file = paths.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;

        Ok(settings)
    }

    /// Save settings to a specific file.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Validate the settings.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidFormat(
                "storage_key cannot be empty".to_string(),
            ));
        }

        // A zero-month window would drop every scan, including the one
        // being saved.
        if self.retention_months == 0 {
            return Err(ConfigError::InvalidFormat(
                "retention_months must be at least 1".to_string(),
            ));
        }

        if self.retention_months > MAX_RETENTION_MONTHS {
            return Err(ConfigError::InvalidFormat(format!(
                "retention_months must be at most {}",
                MAX_RETENTION_MONTHS
            )));
        }

        Ok(())
    }

    /// Retention policy described by these settings.
    pub fn retention(&self) -> Retention {
        Retention::months(self.retention_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths_in(root: &Path) -> Paths {
        Paths {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = StoreSettings::default();
        assert_eq!(settings.storage_key, "boltparser-saved-scans");
        assert_eq!(settings.retention_months, 3);
        assert_eq!(settings.retention(), Retention::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = StoreSettings::load(&paths_in(dir.path())).unwrap();
        assert_eq!(settings, StoreSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        fs::create_dir_all(&paths.config_dir).unwrap();
        fs::write(paths.settings_file(), r#"{"retention_months": 6}"#).unwrap();

        let settings = StoreSettings::load(&paths).unwrap();
        assert_eq!(settings.retention_months, 6);
        assert_eq!(settings.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(settings.data_dir, None);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("settings.json");
        let settings = StoreSettings {
            storage_key: "my-scans".to_string(),
            retention_months: 12,
            data_dir: Some(dir.path().join("kv")),
        };

        settings.save_to(&file).unwrap();
        assert_eq!(StoreSettings::load_from(&file).unwrap(), settings);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.json");

        fs::write(&file, r#"{"retention_months": 0}"#).unwrap();
        assert!(matches!(
            StoreSettings::load_from(&file),
            Err(ConfigError::InvalidFormat(_))
        ));

        fs::write(&file, r#"{"retention_months": 4000000000}"#).unwrap();
        assert!(matches!(
            StoreSettings::load_from(&file),
            Err(ConfigError::InvalidFormat(_))
        ));

        fs::write(&file, r#"{"retention_months": 1200}"#).unwrap();
        assert_eq!(StoreSettings::load_from(&file).unwrap().retention_months, 1200);

        fs::write(&file, "not json").unwrap();
        assert!(matches!(
            StoreSettings::load_from(&file),
            Err(ConfigError::InvalidFormat(_))
        ));
    }
}
