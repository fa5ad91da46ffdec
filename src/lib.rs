//! Profile Editor Library
//!
//! Persistence backend for a single-screen profile editor.
//!
//! # Features
//!
//! - Store the user profile (username, avatar, background) in a local box
//! - Persist a light/dark theme flag and notify subscribers on change
//! - Pick images through pluggable permission and picker capabilities
//!
//! # Example
//!
//! ```no_run
//! use profile_editor::{AppContext, Profile, StorageConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = AppContext::open(StorageConfig::from_env()?)?;
//!
//!     ctx.theme().subscribe(|mode| println!("Theme is now {}", mode));
//!     ctx.theme().toggle()?;
//!
//!     ctx.profiles().add(Profile::new("alice", "p1.jpg", "b1.jpg"))?;
//!     for profile in ctx.profiles().list() {
//!         println!("{}", profile);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod capabilities;
pub mod config;
pub mod context;
pub mod editor;
pub mod error;
pub mod profiles;
pub mod storage;
pub mod theme;

// Re-exports for convenience
pub use config::StorageConfig;
pub use context::AppContext;
pub use editor::{ImageSlot, ProfileEditor};
pub use error::{ProfileError, Result};
pub use profiles::ProfileStore;
pub use storage::Profile;
pub use theme::{ThemeMode, ThemeStore};
