//! Key-value preference store.
//!
//! A flat JSON object on disk, read once at open and written through on
//! every change.

use serde_json::{Map, Value};
use std::path::PathBuf;

use super::{read_optional, write_atomic};
use crate::config::StorageConfig;
use crate::error::{ProfileError, Result};

#[derive(Debug)]
pub struct Preferences {
    path: PathBuf,
    values: Map<String, Value>,
}

impl Preferences {
    /// Load preferences from disk. A missing file is an empty store.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        config.ensure_dir()?;
        let path = config.preferences_path();

        let values = match read_optional(&path)? {
            Some(content) if content.trim().is_empty() => {
                return Err(ProfileError::storage(format!(
                    "Preferences at {} are empty or truncated",
                    path.display()
                )));
            }
            Some(content) => serde_json::from_str(&content).map_err(|e| {
                ProfileError::storage(format!("Failed to parse preferences: {}", e))
            })?,
            None => Map::new(),
        };

        log::debug!("Loaded {} preference(s) from {}", values.len(), path.display());
        Ok(Self { path, values })
    }

    /// Boolean value stored under `key`. Non-boolean values read as absent.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    /// Store a boolean and persist before returning.
    pub fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), Value::Bool(value));
        write_atomic(&self.path, &serde_json::to_string_pretty(&next)?)?;
        self.values = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::open(&StorageConfig::at(dir.path())).unwrap();
        assert_eq!(prefs.get_bool("isDarkMode"), None);
    }

    #[test]
    fn test_set_bool_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::at(dir.path());

        let mut prefs = Preferences::open(&config).unwrap();
        prefs.set_bool("isDarkMode", true).unwrap();

        let reopened = Preferences::open(&config).unwrap();
        assert_eq!(reopened.get_bool("isDarkMode"), Some(true));
    }

    #[test]
    fn test_unrelated_keys_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::at(dir.path());
        std::fs::write(config.preferences_path(), r#"{"locale":"en"}"#).unwrap();

        let mut prefs = Preferences::open(&config).unwrap();
        prefs.set_bool("isDarkMode", false).unwrap();

        let raw = std::fs::read_to_string(config.preferences_path()).unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["locale"], "en");
        assert_eq!(parsed["isDarkMode"], false);
    }

    #[test]
    fn test_non_bool_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::at(dir.path());
        std::fs::write(config.preferences_path(), r#"{"isDarkMode":"yes"}"#).unwrap();

        let prefs = Preferences::open(&config).unwrap();
        assert_eq!(prefs.get_bool("isDarkMode"), None);
    }

    #[test]
    fn test_truncated_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::at(dir.path());
        std::fs::write(config.preferences_path(), "").unwrap();
        assert!(matches!(
            Preferences::open(&config),
            Err(ProfileError::StorageUnavailable { .. })
        ));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::at(dir.path());
        std::fs::write(config.preferences_path(), "[1, 2").unwrap();
        assert!(matches!(
            Preferences::open(&config),
            Err(ProfileError::StorageUnavailable { .. })
        ));
    }
}
