//! Durable, typed, append-indexed record collection.
//!
//! A box is a JSON array on disk. Records are addressed by position; deleting
//! a record shifts every later record down by one.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use super::{read_optional, write_atomic};
use crate::config::StorageConfig;
use crate::error::{ProfileError, Result};

/// A named collection of records of type `T`.
///
/// Every mutation is written through to disk before it becomes visible in
/// memory; a failed write leaves the box unchanged.
#[derive(Debug)]
pub struct RecordBox<T> {
    path: PathBuf,
    records: Vec<T>,
}

impl<T> RecordBox<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Open the box `name`, creating an empty one if it does not exist yet.
    pub fn open(config: &StorageConfig, name: &str) -> Result<Self> {
        config.ensure_dir()?;
        let path = config.box_path(name);

        let records = match read_optional(&path)? {
            // A box is never written empty; a blank file is a torn write.
            Some(content) if content.trim().is_empty() => {
                return Err(ProfileError::storage(format!(
                    "Box '{}' at {} is empty or truncated",
                    name,
                    path.display()
                )));
            }
            Some(content) => serde_json::from_str(&content).map_err(|e| {
                ProfileError::storage(format!("Failed to parse box '{}': {}", name, e))
            })?,
            None => {
                let empty: Vec<T> = Vec::new();
                write_atomic(&path, &serde_json::to_string_pretty(&empty)?)?;
                log::info!("Created box '{}' at {}", name, path.display());
                empty
            }
        };

        log::debug!("Opened box '{}' with {} record(s)", name, records.len());

        Ok(Self {
            path,
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.records.get(index)
    }

    /// Owned copy of all records in insertion order.
    pub fn values(&self) -> Vec<T> {
        self.records.clone()
    }

    /// Append a record and return its index.
    pub fn add(&mut self, value: T) -> Result<usize> {
        let mut next = self.records.clone();
        next.push(value);
        self.commit(next)?;
        Ok(self.records.len() - 1)
    }

    /// Replace the record at `index`.
    pub fn put_at(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        let mut next = self.records.clone();
        next[index] = value;
        self.commit(next)
    }

    /// Remove the record at `index`, shifting later records down.
    pub fn delete_at(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let mut next = self.records.clone();
        next.remove(index);
        self.commit(next)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.records.len() {
            return Err(ProfileError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(())
    }

    fn commit(&mut self, next: Vec<T>) -> Result<()> {
        let content = serde_json::to_string_pretty(&next)?;
        write_atomic(&self.path, &content)?;
        self.records = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> (tempfile::TempDir, StorageConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::at(dir.path());
        (dir, config)
    }

    #[test]
    fn test_open_creates_empty_box() {
        let (_dir, config) = config();
        let b: RecordBox<String> = RecordBox::open(&config, "names").unwrap();
        assert!(b.is_empty());
        assert!(config.box_path("names").exists());
    }

    #[test]
    fn test_open_creates_missing_directory() {
        let (dir, _) = config();
        let config = StorageConfig::at(dir.path().join("nested").join("deeper"));
        let b: RecordBox<String> = RecordBox::open(&config, "names").unwrap();
        assert_eq!(b.len(), 0);
    }

    #[test]
    fn test_records_survive_reopen() {
        let (_dir, config) = config();
        {
            let mut b: RecordBox<String> = RecordBox::open(&config, "names").unwrap();
            assert_eq!(b.add("a".into()).unwrap(), 0);
            assert_eq!(b.add("b".into()).unwrap(), 1);
        }
        let b: RecordBox<String> = RecordBox::open(&config, "names").unwrap();
        assert_eq!(b.values(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_corrupt_box_is_storage_error() {
        let (_dir, config) = config();
        std::fs::write(config.box_path("names"), "{not json").unwrap();
        let err = RecordBox::<String>::open(&config, "names").unwrap_err();
        assert!(matches!(err, ProfileError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_truncated_file_is_storage_error() {
        let (_dir, config) = config();
        std::fs::write(config.box_path("names"), "").unwrap();
        let err = RecordBox::<String>::open(&config, "names").unwrap_err();
        assert!(matches!(err, ProfileError::StorageUnavailable { .. }));
        // The file is left for inspection, not replaced by an empty box.
        assert!(config.box_path("names").exists());
    }

    #[test]
    fn test_empty_array_is_empty_box() {
        let (_dir, config) = config();
        std::fs::write(config.box_path("names"), "[]").unwrap();
        let b = RecordBox::<String>::open(&config, "names").unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn test_unusable_directory_is_storage_error() {
        let (dir, _) = config();
        let file = dir.path().join("plain-file");
        std::fs::write(&file, "x").unwrap();
        let err = RecordBox::<String>::open(&StorageConfig::at(file.join("sub")), "names")
            .unwrap_err();
        assert!(matches!(err, ProfileError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_failed_write_leaves_box_unchanged() {
        let (dir, _) = config();
        let data = dir.path().join("data");
        let config = StorageConfig::at(&data);
        let mut b: RecordBox<String> = RecordBox::open(&config, "names").unwrap();
        b.add("kept".into()).unwrap();

        // Swap the directory for a plain file so the next write cannot land.
        std::fs::remove_dir_all(&data).unwrap();
        std::fs::write(&data, "x").unwrap();

        assert!(b.add("lost".into()).is_err());
        assert_eq!(b.values(), vec!["kept".to_string()]);
    }

    #[test]
    fn test_put_and_delete_out_of_range() {
        let (_dir, config) = config();
        let mut b: RecordBox<String> = RecordBox::open(&config, "names").unwrap();
        assert!(matches!(
            b.put_at(0, "x".into()),
            Err(ProfileError::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert!(matches!(
            b.delete_at(0),
            Err(ProfileError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }
}
