//! TOML-based user preferences.
//!
//! Stores the default study/break durations at
//! `~/.config/studyclock/config.toml`. Values are re-validated through
//! the core config bounds at startup, so a hand-edited file cannot smuggle
//! an out-of-range duration into the engine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use studyclock_core::{ConfigUpdate, SessionConfig};

/// Returns `~/.config/studyclock[-dev]/` based on STUDYCLOCK_ENV.
///
/// Set STUDYCLOCK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYCLOCK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyclock-dev")
    } else {
        base_dir.join("studyclock")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// User preferences, serialized to/from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default = "default_study_minutes")]
    pub study_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

fn default_study_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            study_minutes: default_study_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Prefs {
    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be parsed or the
    /// default file cannot be written.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(_) => {
                let prefs = Self::default();
                prefs.save()?;
                Ok(prefs)
            }
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to the preferences file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            study_minutes: config.study_minutes(),
            break_minutes: config.break_minutes(),
        }
    }

    /// The preferences expressed as a core config update, so they pass
    /// through the same validation as interactive configure.
    pub fn update(&self) -> ConfigUpdate {
        ConfigUpdate {
            study_minutes: Some(self.study_minutes),
            break_minutes: Some(self.break_minutes),
        }
    }
}
