//! Persisted playback preferences (shuffle / repeat)

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use super::types::RepeatMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackPreferences {
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreferencesUpdate {
    pub shuffle: Option<bool>,
    pub repeat: Option<RepeatMode>,
}

impl PlaybackPreferences {
    pub fn apply(mut self, update: PreferencesUpdate) -> Self {
        if let Some(shuffle) = update.shuffle {
            self.shuffle = shuffle;
        }
        if let Some(repeat) = update.repeat {
            self.repeat = repeat;
        }
        self
    }
}

/// Source of truth for playback preferences across sessions.
pub trait SettingsStore: Send + Sync {
    fn playback_preferences(&self) -> Result<PlaybackPreferences>;
    fn set_playback_preferences(&self, update: PreferencesUpdate) -> Result<()>;
}

/// Preferences stored as a small JSON document on disk
pub struct FileSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<PlaybackPreferences> {
        if !self.path.exists() {
            return Ok(PlaybackPreferences::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::from_str(&content).map_err(|e| StoreError::json(&self.path, e))
    }

    fn write(&self, prefs: &PlaybackPreferences) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
            }
        }
        let content = serde_json::to_string_pretty(prefs).map_err(|e| StoreError::json(&self.path, e))?;
        fs::write(&self.path, content).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl SettingsStore for FileSettingsStore {
    fn playback_preferences(&self) -> Result<PlaybackPreferences> {
        self.read()
    }

    fn set_playback_preferences(&self, update: PreferencesUpdate) -> Result<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let prefs = self.read().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored preferences unreadable, overwriting with defaults");
            PlaybackPreferences::default()
        });
        let prefs = prefs.apply(update);
        self.write(&prefs)?;
        tracing::debug!(path = %self.path.display(), shuffle = prefs.shuffle, repeat = ?prefs.repeat, "Playback preferences saved");
        Ok(())
    }
}
