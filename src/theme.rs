//! Persisted light/dark theme flag with change notification.
//!
//! The flag lives in the preference store under [`DARK_MODE_KEY`]. Every
//! change is persisted first; subscribers are notified only afterwards.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::{DARK_MODE_KEY, StorageConfig};
use crate::error::Result;
use crate::storage::Preferences;

// =============================================================================
// Theme Mode
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" | "off" | "false" => Some(ThemeMode::Light),
            "dark" | "on" | "true" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Theme Store
// =============================================================================

/// Handle returned by [`ThemeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(ThemeMode) + Send + Sync>;

struct ThemeState {
    mode: ThemeMode,
    preferences: Preferences,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// Shared theme handle.
///
/// Changes are serialised end to end: a second toggle waits until every
/// listener has seen the first one, so the last value a listener observes is
/// always the stored mode. Listeners must not change the theme themselves.
pub struct ThemeStore {
    state: Mutex<ThemeState>,
    subscribers: Mutex<Subscribers>,
    changes: Mutex<()>,
}

impl ThemeStore {
    /// Open the preference store and read the persisted flag.
    pub fn load(config: &StorageConfig) -> Result<Self> {
        Ok(Self::with_preferences(Preferences::open(config)?))
    }

    /// Build a store over already opened preferences. Absent flag → light.
    pub fn with_preferences(preferences: Preferences) -> Self {
        let mode = ThemeMode::from_dark(preferences.get_bool(DARK_MODE_KEY).unwrap_or(false));
        log::debug!("Loaded theme: {}", mode);

        Self {
            state: Mutex::new(ThemeState { mode, preferences }),
            subscribers: Mutex::new(Subscribers::default()),
            changes: Mutex::new(()),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.lock_state().mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode().is_dark()
    }

    /// Flip the mode, persist it, then notify subscribers.
    ///
    /// On a persistence failure the mode is left untouched and nobody is
    /// notified.
    pub fn toggle(&self) -> Result<ThemeMode> {
        let _change = self.lock_changes();
        let next = {
            let mut state = self.lock_state();
            let next = state.mode.toggled();
            Self::persist(&mut state, next)?;
            next
        };
        self.notify(next);
        Ok(next)
    }

    /// Set an explicit mode. Setting the current mode writes nothing.
    pub fn set_mode(&self, mode: ThemeMode) -> Result<()> {
        let _change = self.lock_changes();
        {
            let mut state = self.lock_state();
            if state.mode == mode {
                return Ok(());
            }
            Self::persist(&mut state, mode)?;
        }
        self.notify(mode);
        Ok(())
    }

    /// Register a callback invoked with the new mode after every change.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(ThemeMode) + Send + Sync + 'static,
    {
        let mut subs = self.lock_subscribers();
        let id = SubscriptionId(subs.next_id);
        subs.next_id += 1;
        subs.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.lock_subscribers();
        let before = subs.listeners.len();
        subs.listeners.retain(|(sid, _)| *sid != id);
        subs.listeners.len() != before
    }

    fn persist(state: &mut ThemeState, mode: ThemeMode) -> Result<()> {
        state.preferences.set_bool(DARK_MODE_KEY, mode.is_dark())?;
        state.mode = mode;
        log::info!("Theme set to {}", mode);
        Ok(())
    }

    fn notify(&self, mode: ThemeMode) {
        // Listeners run without the state or subscriber locks so they may read
        // the store and subscribe.
        let listeners: Vec<Listener> = self
            .lock_subscribers()
            .listeners
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        for listener in listeners {
            listener(mode);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ThemeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_changes(&self) -> MutexGuard<'_, ()> {
        self.changes.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Subscribers> {
        self.subscribers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("mode", &self.mode())
            .field("subscribers", &self.lock_subscribers().listeners.len())
            .finish()
    }
}
