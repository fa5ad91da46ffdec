//! Application-lifetime service container.
//!
//! Built once at startup and passed to whatever needs the stores.

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::editor::ProfileEditor;
use crate::error::Result;
use crate::profiles::ProfileStore;
use crate::theme::ThemeStore;

#[derive(Debug, Clone)]
pub struct AppContext {
    config: StorageConfig,
    theme: Arc<ThemeStore>,
    profiles: Arc<ProfileStore>,
}

impl AppContext {
    /// Open storage and construct both stores. Any storage failure is fatal.
    pub fn open(config: StorageConfig) -> Result<Self> {
        let theme = Arc::new(ThemeStore::load(&config)?);
        let profiles = Arc::new(ProfileStore::open(&config)?);
        log::info!("Storage opened at {}", config.data_dir.display());

        Ok(Self {
            config,
            theme,
            profiles,
        })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn theme(&self) -> &Arc<ThemeStore> {
        &self.theme
    }

    pub fn profiles(&self) -> &Arc<ProfileStore> {
        &self.profiles
    }

    pub fn editor(&self) -> ProfileEditor {
        ProfileEditor::new(Arc::clone(&self.profiles))
    }
}
