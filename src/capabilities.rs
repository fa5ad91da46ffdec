//! External capabilities the editor depends on.
//!
//! Image selection, runtime permission requests and the "open settings"
//! fallback are platform services. They are modelled as traits so the
//! editor can be driven by a real platform, the CLI, or a test double.

use std::path::{Path, PathBuf};

use crate::error::{ProfileError, Result};

/// Result of a runtime permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Outcome of an image pick that was allowed to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user selected an image at this local path.
    Picked(String),
    /// The user dismissed the picker.
    Cancelled,
}

pub trait ImagePicker {
    /// Let the user select an image. `Ok(None)` means the user cancelled;
    /// a selection that cannot be used is an error.
    fn pick_image(&self) -> Result<Option<PathBuf>>;
}

pub trait PermissionRequester {
    /// Ask for access to the user's photo library.
    fn request_photo_access(&self) -> PermissionStatus;
}

pub trait SettingsOpener {
    /// Send the user to the system settings page for this app.
    fn open_app_settings(&self);
}

/// Request photo access, then run the picker.
///
/// A denial opens the system settings and returns
/// [`ProfileError::PermissionDenied`]; the picker is never shown.
pub fn pick_with_permission(
    picker: &dyn ImagePicker,
    permissions: &dyn PermissionRequester,
    settings: &dyn SettingsOpener,
) -> Result<PickOutcome> {
    if permissions.request_photo_access() == PermissionStatus::Denied {
        log::warn!("Photo library access denied; opening app settings");
        settings.open_app_settings();
        return Err(ProfileError::PermissionDenied("photo library".into()));
    }

    match picker.pick_image()? {
        Some(path) => {
            let path = path.to_string_lossy().into_owned();
            log::debug!("Picked image {}", path);
            Ok(PickOutcome::Picked(path))
        }
        None => {
            log::debug!("Image pick cancelled");
            Ok(PickOutcome::Cancelled)
        }
    }
}

// =============================================================================
// Filesystem-backed implementations (used by the CLI)
// =============================================================================

/// Picker that "selects" a path supplied up front.
///
/// No path counts as a cancel. A supplied path that is not a regular file is
/// [`ProfileError::InvalidInput`].
#[derive(Debug, Clone, Default)]
pub struct PathImagePicker {
    path: Option<PathBuf>,
}

impl PathImagePicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ImagePicker for PathImagePicker {
    fn pick_image(&self) -> Result<Option<PathBuf>> {
        let Some(path) = self.path.as_ref() else {
            return Ok(None);
        };
        if !path.is_file() {
            return Err(ProfileError::InvalidInput(format!(
                "{} is not an image file",
                path.display()
            )));
        }
        Ok(Some(path.clone()))
    }
}

/// Grants access unless the OS refuses to open the candidate file.
#[derive(Debug, Clone, Default)]
pub struct FilesystemPermission {
    path: Option<PathBuf>,
}

impl FilesystemPermission {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    fn check(path: &Path) -> PermissionStatus {
        match std::fs::File::open(path) {
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => PermissionStatus::Denied,
            _ => PermissionStatus::Granted,
        }
    }
}

impl PermissionRequester for FilesystemPermission {
    fn request_photo_access(&self) -> PermissionStatus {
        self.path
            .as_deref()
            .map(Self::check)
            .unwrap_or(PermissionStatus::Granted)
    }
}

/// Prints where the user can grant access instead of opening a settings app.
#[derive(Debug, Clone, Copy, Default)]
pub struct HintSettingsOpener;

impl SettingsOpener for HintSettingsOpener {
    fn open_app_settings(&self) {
        eprintln!("⚠️  Access denied. Check the file permissions and try again.");
    }
}
