//! `SettingsStore` implementations.
//!
//! `InMemorySettingsStore` keeps preferences for the life of the process;
//! `TomlFileSettingsStore` persists them to a TOML file on every save.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use flarehealth_contracts::{
    error::{FlareHealthError, FlareHealthResult},
    settings::Settings,
};

use crate::traits::SettingsStore;

#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    inner: Mutex<Settings>,
}

impl InMemorySettingsStore {
    pub fn new(initial: Settings) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load(&self) -> FlareHealthResult<Settings> {
        let settings = self.inner.lock().map_err(|e| FlareHealthError::SettingsError {
            reason: format!("settings lock poisoned: {}", e),
        })?;
        Ok(*settings)
    }

    fn save(&self, settings: &Settings) -> FlareHealthResult<()> {
        let mut stored = self.inner.lock().map_err(|e| FlareHealthError::SettingsError {
            reason: format!("settings lock poisoned: {}", e),
        })?;
        *stored = *settings;
        Ok(())
    }
}

/// Settings persisted as a TOML document at a fixed path.
///
/// A missing file loads as `Settings::default()`; it is created on the first
/// save.
#[derive(Debug, Clone)]
pub struct TomlFileSettingsStore {
    path: PathBuf,
}

impl TomlFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for TomlFileSettingsStore {
    fn load(&self) -> FlareHealthResult<Settings> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| FlareHealthError::SettingsError {
            reason: format!("failed to read settings file '{}': {}", self.path.display(), e),
        })?;

        toml::from_str(&contents).map_err(|e| FlareHealthError::SettingsError {
            reason: format!("failed to parse settings file '{}': {}", self.path.display(), e),
        })
    }

    fn save(&self, settings: &Settings) -> FlareHealthResult<()> {
        let contents = toml::to_string(settings).map_err(|e| FlareHealthError::SettingsError {
            reason: format!("failed to serialize settings: {}", e),
        })?;

        std::fs::write(&self.path, contents).map_err(|e| FlareHealthError::SettingsError {
            reason: format!("failed to write settings file '{}': {}", self.path.display(), e),
        })?;

        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
