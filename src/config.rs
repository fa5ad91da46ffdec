//! Storage configuration for the profile editor.
//!
//! Resolves where the record box and the preference file live.
//! Cross-platform: uses the appropriate data directory for each OS.

use std::path::PathBuf;

use crate::error::{ProfileError, Result};

// =============================================================================
// Constants
// =============================================================================

pub const APP_NAME: &str = "profile-editor";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "PROFILE_EDITOR_HOME";

/// Name of the record collection holding user profiles.
pub const USERS_BOX: &str = "users";

/// File name of the key-value preference store.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Preference key of the persisted dark-mode flag.
pub const DARK_MODE_KEY: &str = "isDarkMode";

// =============================================================================
// Storage Config
// =============================================================================

/// Location of all persisted editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Use an explicit data directory.
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory from the environment.
    /// - `PROFILE_EDITOR_HOME` if set and non-empty
    /// - Linux: ~/.local/share/profile-editor/
    /// - Windows: %APPDATA%\profile-editor\
    pub fn from_env() -> Result<Self> {
        let env_dir = std::env::var_os(HOME_ENV).map(PathBuf::from);
        Self::resolve(None, env_dir, dirs::data_dir())
    }

    /// Pick the first available location: explicit, then env, then platform.
    pub fn resolve(
        explicit: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        platform_dir: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(dir) = explicit {
            return Ok(Self::at(dir));
        }
        if let Some(dir) = env_dir.filter(|d| !d.as_os_str().is_empty()) {
            return Ok(Self::at(dir));
        }
        platform_dir
            .map(|p| Self::at(p.join(APP_NAME)))
            .ok_or_else(|| ProfileError::storage("Could not find a data directory"))
    }

    /// Full path of a named record box.
    pub fn box_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.box.json", name))
    }

    /// Full path of the preference file.
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCES_FILE)
    }

    /// Create the data directory if needed.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| {
            ProfileError::storage(format!(
                "Failed to create data dir {}: {}",
                self.data_dir.display(),
                e
            ))
        })
    }
}
