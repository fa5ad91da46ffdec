//! Profile Editor CLI
//!
//! Command-line front end for editing the stored profile and theme.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use profile_editor::capabilities::{
    FilesystemPermission, HintSettingsOpener, PathImagePicker, PickOutcome,
};
use profile_editor::storage::{DEFAULT_BACKGROUND_IMAGE, DEFAULT_PROFILE_IMAGE};
use profile_editor::{AppContext, ImageSlot, Profile, ProfileError, StorageConfig, ThemeMode};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Profile editor
#[derive(Parser, Debug)]
#[command(name = "profile-editor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory (defaults to $PROFILE_EDITOR_HOME or the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all stored profiles with their indices
    List,

    /// Show the current profile and theme
    Show,

    /// Append a new profile
    Add {
        username: String,

        /// Profile image path or asset
        #[arg(short, long, default_value = DEFAULT_PROFILE_IMAGE)]
        profile_image: String,

        /// Background image path or asset
        #[arg(short, long, default_value = DEFAULT_BACKGROUND_IMAGE)]
        background_image: String,
    },

    /// Replace the profile at an index (unspecified fields keep their value)
    Update {
        index: usize,

        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        profile_image: Option<String>,

        #[arg(short, long)]
        background_image: Option<String>,
    },

    /// Delete the profile at an index (later indices shift down)
    Delete { index: usize },

    /// Set the username of the current profile
    SetUsername { username: String },

    /// Pick an image for the current profile
    PickImage {
        /// Slot: profile or background
        slot: String,

        /// Image file; omit to cancel the pick
        path: Option<PathBuf>,
    },

    /// Show the theme, or set it to light/dark
    Theme { mode: Option<String> },

    /// Flip between light and dark
    ToggleTheme,

    /// Print storage locations
    Paths,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match args.data_dir {
        Some(dir) => StorageConfig::at(dir),
        None => StorageConfig::from_env().context("Failed to resolve data directory")?,
    };
    let ctx = AppContext::open(config).context("Failed to open storage")?;

    let result = match args.command {
        Command::List => cmd_list(&ctx),
        Command::Show => cmd_show(&ctx),
        Command::Add {
            username,
            profile_image,
            background_image,
        } => cmd_add(&ctx, Profile::new(username, profile_image, background_image)),
        Command::Update {
            index,
            username,
            profile_image,
            background_image,
        } => cmd_update(&ctx, index, username, profile_image, background_image),
        Command::Delete { index } => cmd_delete(&ctx, index),
        Command::SetUsername { username } => cmd_set_username(&ctx, &username),
        Command::PickImage { slot, path } => cmd_pick_image(&ctx, &slot, path),
        Command::Theme { mode } => cmd_theme(&ctx, mode.as_deref()),
        Command::ToggleTheme => cmd_toggle_theme(&ctx),
        Command::Paths => cmd_paths(&ctx),
    };

    let recoverable = result
        .as_ref()
        .err()
        .and_then(|e| e.downcast_ref::<ProfileError>())
        .is_some_and(ProfileError::is_recoverable);
    if recoverable {
        eprintln!("💡 Nothing was saved. Fix the input and retry (`profile-editor list` shows current indices).");
    }
    result
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

// =============================================================================
// Command Implementations
// =============================================================================

fn cmd_list(ctx: &AppContext) -> Result<()> {
    let profiles = ctx.profiles().list();
    if profiles.is_empty() {
        println!("No profiles stored.");
        return Ok(());
    }

    for (index, profile) in profiles.iter().enumerate() {
        println!("[{}] {}", index, profile);
    }
    Ok(())
}

fn cmd_show(ctx: &AppContext) -> Result<()> {
    let profile = ctx.editor().current();
    println!("Username:   {}", profile.username);
    println!("Avatar:     {}", profile.profile_image_ref);
    println!("Background: {}", profile.bg_image_ref);
    println!("Theme:      {}", ctx.theme().mode());
    Ok(())
}

fn cmd_add(ctx: &AppContext, profile: Profile) -> Result<()> {
    ctx.profiles()
        .add(profile)
        .context("Failed to add profile")?;
    println!(
        "✅ Profile added at index {}",
        ctx.profiles().len().saturating_sub(1)
    );
    Ok(())
}

fn cmd_update(
    ctx: &AppContext,
    index: usize,
    username: Option<String>,
    profile_image: Option<String>,
    background_image: Option<String>,
) -> Result<()> {
    let existing = ctx
        .profiles()
        .get(index)
        .ok_or(ProfileError::IndexOutOfRange {
            index,
            len: ctx.profiles().len(),
        })?;

    let profile = Profile {
        username: username.unwrap_or(existing.username),
        profile_image_ref: profile_image.unwrap_or(existing.profile_image_ref),
        bg_image_ref: background_image.unwrap_or(existing.bg_image_ref),
    };

    ctx.profiles()
        .update_at(index, profile)
        .context("Failed to update profile")?;
    println!("✅ Profile {} updated", index);
    Ok(())
}

fn cmd_delete(ctx: &AppContext, index: usize) -> Result<()> {
    ctx.profiles()
        .delete_at(index)
        .context("Failed to delete profile")?;
    println!("🗑️  Profile {} deleted", index);
    Ok(())
}

fn cmd_set_username(ctx: &AppContext, username: &str) -> Result<()> {
    let profile = ctx
        .editor()
        .set_username(username)
        .context("Failed to save username")?;
    println!("✅ Username set to '{}'", profile.username);
    Ok(())
}

fn cmd_pick_image(ctx: &AppContext, slot: &str, path: Option<PathBuf>) -> Result<()> {
    let slot = ImageSlot::from_str(slot)?;
    let picker = PathImagePicker::new(path.clone());
    let permissions = FilesystemPermission::new(path);

    match ctx
        .editor()
        .pick_image(slot, &picker, &permissions, &HintSettingsOpener)?
    {
        PickOutcome::Picked(path) => println!("✅ {:?} image set to {}", slot, path),
        PickOutcome::Cancelled => println!("Pick cancelled, profile unchanged."),
    }
    Ok(())
}

fn cmd_theme(ctx: &AppContext, mode: Option<&str>) -> Result<()> {
    if let Some(name) = mode {
        let mode = ThemeMode::from_str(name).ok_or_else(|| {
            ProfileError::InvalidInput(format!("Unknown theme '{}'. Use light or dark", name))
        })?;
        ctx.theme().set_mode(mode).context("Failed to save theme")?;
    }
    println!("🎨 Theme: {}", ctx.theme().mode());
    Ok(())
}

fn cmd_toggle_theme(ctx: &AppContext) -> Result<()> {
    ctx.theme()
        .subscribe(|mode| println!("🎨 Theme switched to {}", mode));
    ctx.theme().toggle().context("Failed to toggle theme")?;
    Ok(())
}

fn cmd_paths(ctx: &AppContext) -> Result<()> {
    let config = ctx.config();
    println!("Data dir:    {}", config.data_dir.display());
    println!(
        "Profiles:    {}",
        config
            .box_path(profile_editor::config::USERS_BOX)
            .display()
    );
    println!("Preferences: {}", config.preferences_path().display());
    Ok(())
}
