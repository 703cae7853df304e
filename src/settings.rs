// SPDX-FileCopyrightText: 2025 casewise contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! Persisted user settings.
//!
//! The only setting is whether sentence starts are capitalized while typing.
//! Stores hand out [`Settings`]; execution contexts keep their own copy and
//! change it only through [`SettingsUpdate`] messages.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User settings as persisted by a [`SettingsStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Capitalize the first letter of each sentence while typing (default:
    /// false).
    pub auto_capitalize_enabled: bool,
}

/// A settings change sent to every live execution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub auto_capitalize_enabled: bool,
}

impl From<Settings> for SettingsUpdate {
    fn from(settings: Settings) -> Self {
        Self {
            auto_capitalize_enabled: settings.auto_capitalize_enabled,
        }
    }
}

/// Errors raised by settings stores.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Loads and persists [`Settings`].
pub trait SettingsStore {
    /// Loads the stored settings, or the defaults when nothing is stored.
    fn load(&self) -> Result<Settings, SettingsError>;

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError>;
}

/// A store that keeps settings in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    settings: Option<Settings>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Some(settings),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        Ok(self.settings.unwrap_or_default())
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        self.settings = Some(*settings);
        Ok(())
    }
}

/// A store backed by a TOML file.  A missing file holds the defaults.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => return Err(SettingsError::Io(self.path.clone(), e)),
        };
        toml::from_str(&content).map_err(|e| SettingsError::Parse(self.path.clone(), e))
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        let content = toml::to_string(settings)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(parent.to_path_buf(), e))?;
        }
        std::fs::write(&self.path, content).map_err(|e| SettingsError::Io(self.path.clone(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        assert!(!Settings::default().auto_capitalize_enabled);
        assert!(!MemoryStore::new().load().unwrap().auto_capitalize_enabled);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let enabled = Settings {
            auto_capitalize_enabled: true,
        };
        store.save(&enabled).unwrap();
        assert_eq!(store.load().unwrap(), enabled);
    }

    #[test]
    fn test_file_store_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("settings.toml"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let mut store = FileStore::new(&path);
        assert_eq!(store.path(), path);
        store
            .save(&Settings {
                auto_capitalize_enabled: true,
            })
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("auto_capitalize_enabled = true"));
        assert!(FileStore::new(&path).load().unwrap().auto_capitalize_enabled);
    }

    #[test]
    fn test_file_store_empty_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "").unwrap();
        assert_eq!(FileStore::new(&path).load().unwrap(), Settings::default());
    }

    #[test]
    fn test_file_store_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "auto_capitalize_enabled = maybe").unwrap();
        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SettingsError::Parse(..)));
    }

    #[test]
    fn test_update_from_settings() {
        let update = SettingsUpdate::from(Settings {
            auto_capitalize_enabled: true,
        });
        assert!(update.auto_capitalize_enabled);
    }
}
