use serde::{Deserialize, Serialize};

/// Asset shown until the user picks a profile image.
pub const DEFAULT_PROFILE_IMAGE: &str = "assets/profile.png";

/// Asset shown until the user picks a background image.
pub const DEFAULT_BACKGROUND_IMAGE: &str = "assets/background.jpg";

/// The persisted user record.
///
/// All three fields are required on disk; a record missing any of them
/// fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    /// Local file path or bundled asset identifier.
    pub profile_image_ref: String,
    /// Local file path or bundled asset identifier.
    pub bg_image_ref: String,
}

impl Profile {
    pub fn new(
        username: impl Into<String>,
        profile_image_ref: impl Into<String>,
        bg_image_ref: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            profile_image_ref: profile_image_ref.into(),
            bg_image_ref: bg_image_ref.into(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("", DEFAULT_PROFILE_IMAGE, DEFAULT_BACKGROUND_IMAGE)
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (avatar: {}, background: {})",
            if self.username.is_empty() {
                "<unnamed>"
            } else {
                self.username.as_str()
            },
            self.profile_image_ref,
            self.bg_image_ref
        )
    }
}
