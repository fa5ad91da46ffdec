//! Single-screen profile editing workflow.
//!
//! The editor works on the current profile, which is the first record in
//! the store. Saving before any profile exists creates it.

use std::sync::Arc;

use crate::capabilities::{
    ImagePicker, PermissionRequester, PickOutcome, SettingsOpener, pick_with_permission,
};
use crate::error::{ProfileError, Result};
use crate::profiles::ProfileStore;
use crate::storage::Profile;

const CURRENT: usize = 0;

/// Which image on the profile screen is being replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    /// The round avatar.
    Profile,
    /// The header background.
    Background,
}

impl ImageSlot {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "profile" | "avatar" => Ok(ImageSlot::Profile),
            "background" | "bg" => Ok(ImageSlot::Background),
            _ => Err(ProfileError::InvalidInput(format!(
                "Unknown image slot '{}'. Use 'profile' or 'background'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileEditor {
    store: Arc<ProfileStore>,
}

impl ProfileEditor {
    pub fn new(store: Arc<ProfileStore>) -> Self {
        Self { store }
    }

    /// The stored current profile, or the default one if nothing is saved.
    pub fn current(&self) -> Profile {
        self.store.get(CURRENT).unwrap_or_default()
    }

    /// Persist `profile` as the current profile.
    pub fn save(&self, profile: Profile) -> Result<()> {
        self.store.upsert_first(|current| *current = profile)?;
        Ok(())
    }

    pub fn set_username(&self, username: &str) -> Result<Profile> {
        let username = username.trim().to_string();
        self.store.upsert_first(|current| current.username = username)
    }

    /// Run the permission + picker flow and store the chosen image in `slot`.
    ///
    /// Denied access and a cancelled pick both leave the stored profile
    /// untouched.
    pub fn pick_image(
        &self,
        slot: ImageSlot,
        picker: &dyn ImagePicker,
        permissions: &dyn PermissionRequester,
        settings: &dyn SettingsOpener,
    ) -> Result<PickOutcome> {
        let outcome = pick_with_permission(picker, permissions, settings)?;

        if let PickOutcome::Picked(path) = &outcome {
            self.store.upsert_first(|current| match slot {
                ImageSlot::Profile => current.profile_image_ref = path.clone(),
                ImageSlot::Background => current.bg_image_ref = path.clone(),
            })?;
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::PermissionStatus;
    use crate::capabilities::test_support::*;
    use crate::config::StorageConfig;

    fn editor() -> (tempfile::TempDir, Arc<ProfileStore>, ProfileEditor) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ProfileStore::open(&StorageConfig::at(dir.path())).unwrap());
        let editor = ProfileEditor::new(Arc::clone(&store));
        (dir, store, editor)
    }

    #[test]
    fn test_current_defaults_when_empty() {
        let (_dir, store, editor) = editor();
        assert_eq!(editor.current(), Profile::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_username_creates_then_updates() {
        let (_dir, store, editor) = editor();
        editor.set_username("  alice ").unwrap();
        editor.set_username("alicia").unwrap();

        let list = store.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].username, "alicia");
    }

    #[test]
    fn test_pick_background() {
        let (_dir, store, editor) = editor();
        editor.set_username("alice").unwrap();

        let outcome = editor
            .pick_image(
                ImageSlot::Background,
                &FixedPicker(Some("/photos/sky.jpg")),
                &FixedPermission(PermissionStatus::Granted),
                &CountingSettings::default(),
            )
            .unwrap();

        assert_eq!(outcome, PickOutcome::Picked("/photos/sky.jpg".into()));
        let saved = store.get(0).unwrap();
        assert_eq!(saved.username, "alice");
        assert_eq!(saved.bg_image_ref, "/photos/sky.jpg");
        assert_eq!(saved.profile_image_ref, Profile::default().profile_image_ref);
    }

    #[test]
    fn test_denied_pick_leaves_profile() {
        let (_dir, store, editor) = editor();
        editor.set_username("alice").unwrap();
        let before = store.list();
        let settings = CountingSettings::default();

        let res = editor.pick_image(
            ImageSlot::Profile,
            &FixedPicker(Some("/photos/me.jpg")),
            &FixedPermission(PermissionStatus::Denied),
            &settings,
        );

        assert!(matches!(res, Err(ProfileError::PermissionDenied(_))));
        assert_eq!(settings.opened.get(), 1);
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_cancelled_pick_writes_nothing() {
        let (_dir, store, editor) = editor();
        let outcome = editor
            .pick_image(
                ImageSlot::Profile,
                &FixedPicker(None),
                &FixedPermission(PermissionStatus::Granted),
                &CountingSettings::default(),
            )
            .unwrap();
        assert_eq!(outcome, PickOutcome::Cancelled);
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_image_file_is_error() {
        use crate::capabilities::{FilesystemPermission, PathImagePicker};
        use std::path::PathBuf;

        let (_dir, store, editor) = editor();
        editor.set_username("alice").unwrap();
        let before = store.list();
        let missing = PathBuf::from("/no/such/image.png");

        let res = editor.pick_image(
            ImageSlot::Profile,
            &PathImagePicker::new(Some(missing.clone())),
            &FilesystemPermission::new(Some(missing)),
            &CountingSettings::default(),
        );

        assert!(matches!(res, Err(ProfileError::InvalidInput(_))));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_concurrent_saves_on_empty_store() {
        use std::thread;

        let (_dir, store, editor) = editor();
        let handles: Vec<_> = ["alice", "bob"]
            .into_iter()
            .map(|name| {
                let editor = editor.clone();
                thread::spawn(move || editor.set_username(name).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_slot_from_str() {
        assert_eq!(ImageSlot::from_str("Avatar").unwrap(), ImageSlot::Profile);
        assert_eq!(ImageSlot::from_str("bg").unwrap(), ImageSlot::Background);
        assert!(matches!(
            ImageSlot::from_str("banner"),
            Err(ProfileError::InvalidInput(_))
        ));
    }
}
