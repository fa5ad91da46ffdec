//! Profile storage and persistence.
//!
//! Wraps the `users` record box. Profiles are identified by position: a
//! delete shifts every later index down, so callers must re-list after a
//! delete instead of reusing indices they held before it.

use std::sync::{Mutex, MutexGuard};

use crate::config::{StorageConfig, USERS_BOX};
use crate::error::Result;
use crate::storage::{Profile, RecordBox};

#[derive(Debug)]
pub struct ProfileStore {
    records: Mutex<RecordBox<Profile>>,
}

impl ProfileStore {
    /// Open (creating if absent) the `users` box.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let records = RecordBox::open(config, USERS_BOX)?;
        log::debug!(
            "Profile store ready at {} ({} record(s))",
            records.path().display(),
            records.len()
        );
        Ok(Self {
            records: Mutex::new(records),
        })
    }

    /// Snapshot of all profiles in insertion order.
    pub fn list(&self) -> Vec<Profile> {
        self.lock().values()
    }

    pub fn get(&self, index: usize) -> Option<Profile> {
        self.lock().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Append a profile at the end.
    pub fn add(&self, profile: Profile) -> Result<()> {
        let index = self.lock().add(profile)?;
        log::info!("Added profile at index {}", index);
        Ok(())
    }

    /// Replace the profile at `index` entirely.
    pub fn update_at(&self, index: usize, profile: Profile) -> Result<()> {
        self.lock().put_at(index, profile)?;
        log::info!("Updated profile at index {}", index);
        Ok(())
    }

    /// Remove the profile at `index`, shifting later profiles down.
    pub fn delete_at(&self, index: usize) -> Result<()> {
        self.lock().delete_at(index)?;
        log::info!("Deleted profile at index {}", index);
        Ok(())
    }

    /// Edit the first profile in place, creating it from the default if the
    /// store is empty. The read, edit and write happen under one lock.
    pub fn upsert_first<F>(&self, edit: F) -> Result<Profile>
    where
        F: FnOnce(&mut Profile),
    {
        let mut records = self.lock();
        let mut profile = records.get(0).cloned().unwrap_or_default();
        edit(&mut profile);

        if records.is_empty() {
            records.add(profile.clone())?;
        } else {
            records.put_at(0, profile.clone())?;
        }
        log::info!("Saved current profile");
        Ok(profile)
    }

    fn lock(&self) -> MutexGuard<'_, RecordBox<Profile>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}
