//! Game settings and preferences
//!
//! Persisted as JSON next to the high score table.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::tuning::{Difficulty, Tuning};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty preset the tuning was derived from
    pub difficulty: Difficulty,
    /// Fixed run seed (random per run when unset)
    pub seed: Option<u64>,
    /// Balance table, may be hand-edited
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Difficulty::Normal)
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: Difficulty) -> Self {
        Self {
            difficulty: preset,
            seed: None,
            tuning: preset.tuning(),
        }
    }

    /// Apply a difficulty preset (replaces the tuning table)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.tuning = preset.tuning();
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings: {err:#}");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
    }

    /// Save settings to a JSON file (write to temp, then rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_atomic(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

/// Write to a sibling temp file, then rename it over `path`
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(value)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming to {}", path.display()))?;
    Ok(())
}
