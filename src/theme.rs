//! Light/dark theme preference.
//!
//! The chosen theme is the one persisted artifact of a session: a single
//! `theme` key in a [`PreferenceStore`]. At startup the saved value wins;
//! without one the system (or configured) preference decides.
//!
//! The CLI keeps preferences in a small JSON file ([`JsonFileStore`]); tests
//! and embedding hosts use [`MemoryStore`].

use crate::dom::{Document, MountPoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Key under which the theme is stored.
pub const THEME_KEY: &str = "theme";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value. Accepts the older `light-mode`/`dark-mode`
    /// spellings too.
    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim() {
            "light" | "light-mode" => Some(Theme::Light),
            "dark" | "dark-mode" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the toggle button: what pressing it will do.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Switch to dark theme",
            Theme::Dark => "Switch to light theme",
        }
    }
}

/// Browser-local-storage style key/value persistence.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences stored as a flat JSON object on disk. Every `set` rewrites
/// the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

/// Owns the current theme and its persistence.
#[derive(Debug)]
pub struct ThemeSwitcher<P: PreferenceStore> {
    store: P,
    current: Theme,
}

impl<P: PreferenceStore> ThemeSwitcher<P> {
    /// Saved preference first, then `system`.
    pub fn new(store: P, system: Theme) -> Self {
        let saved = store.get(THEME_KEY).as_deref().and_then(Theme::parse);
        let current = saved.unwrap_or(system);
        debug!(theme = current.as_str(), saved = saved.is_some(), "initial theme");
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Push the current theme to the page without persisting it.
    pub fn apply(&self, doc: &mut dyn Document) {
        doc.set_theme(self.current);
        let pressed = if self.current == Theme::Dark { "true" } else { "false" };
        doc.set_attribute(MountPoint::ThemeToggle, "aria-pressed", pressed);
        doc.set_attribute(
            MountPoint::ThemeToggle,
            "aria-label",
            self.current.toggle_label(),
        );
    }

    /// Flip, persist, apply, announce.
    pub fn toggle(&mut self, doc: &mut dyn Document) -> Result<Theme, StoreError> {
        let next = self.current.toggled();
        self.store.set(THEME_KEY, next.as_str())?;
        self.current = next;
        self.apply(doc);
        doc.announce(&format!("Switched to {} mode", next.as_str()));
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use tempfile::TempDir;

    #[test]
    fn saved_preference_wins_over_system() {
        let switcher = ThemeSwitcher::new(MemoryStore::with(THEME_KEY, "dark"), Theme::Light);
        assert_eq!(switcher.current(), Theme::Dark);
    }

    #[test]
    fn system_preference_used_without_saved_value() {
        let switcher = ThemeSwitcher::new(MemoryStore::new(), Theme::Dark);
        assert_eq!(switcher.current(), Theme::Dark);
    }

    #[test]
    fn garbage_saved_value_is_ignored() {
        let switcher = ThemeSwitcher::new(MemoryStore::with(THEME_KEY, "purple"), Theme::Light);
        assert_eq!(switcher.current(), Theme::Light);
    }

    #[test]
    fn legacy_mode_suffix_parses() {
        assert_eq!(Theme::parse("dark-mode"), Some(Theme::Dark));
        assert_eq!(Theme::parse("light-mode"), Some(Theme::Light));
    }

    #[test]
    fn toggle_persists_and_updates_document() {
        let mut doc = MemoryDocument::with_all_mounts();
        let mut switcher = ThemeSwitcher::new(MemoryStore::new(), Theme::Light);
        switcher.apply(&mut doc);
        assert_eq!(doc.attribute(MountPoint::ThemeToggle, "aria-pressed"), Some("false"));

        let theme = switcher.toggle(&mut doc).unwrap();
        assert_eq!(theme, Theme::Dark);
        assert_eq!(switcher.store().get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(doc.theme(), Some(Theme::Dark));
        assert_eq!(doc.attribute(MountPoint::ThemeToggle, "aria-pressed"), Some("true"));
        assert_eq!(
            doc.attribute(MountPoint::ThemeToggle, "aria-label"),
            Some("Switch to light theme")
        );
        assert_eq!(doc.announcements().last().map(String::as_str), Some("Switched to dark mode"));
    }

    #[test]
    fn json_file_store_round_trips_through_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state/prefs.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(THEME_KEY), None);
        store.set(THEME_KEY, "dark").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_store_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Json(_))));
    }
}
