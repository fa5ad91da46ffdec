//! Record and preference persistence.
//!
//! Handles saving and loading the profile box and key-value preferences
//! to/from disk.

pub mod preferences;
pub mod record_box;
pub mod types;

// Re-export commonly used items
pub use preferences::Preferences;
pub use record_box::RecordBox;
pub use types::*;

use std::io::Write;
use std::path::Path;

use crate::error::{ProfileError, Result};

/// Write `content` to `path` through a synced temporary sibling and a
/// rename, so neither a reader nor a crash can leave a half-written file.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp = path.with_extension("tmp");

    let written = std::fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(content.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(ProfileError::storage(format!(
            "Failed to write {}: {}",
            tmp.display(),
            e
        )));
    }

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        ProfileError::storage(format!("Failed to replace {}: {}", path.display(), e))
    })
}

/// Read a file, treating a missing file as `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ProfileError::storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}
