use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use place_types::DEFAULT_PLAYER_NAME;

/// The small slice of state that outlives a session: the local player's
/// display name, kept in a JSON file next to whatever path the host picks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub display_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

/// File-backed store for `Settings`. A missing or unreadable file yields
/// defaults rather than an error; only saving can fail.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Settings {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "settings file unreadable, using defaults");
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let raw = serde_json::to_string_pretty(settings)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating settings dir {}", parent.display()))?;
        }
        fs::write(&self.path, raw)
            .with_context(|| format!("writing settings to {}", self.path.display()))
    }
}
