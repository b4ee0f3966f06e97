//! Rollcall configuration.
//!
//! User-level config: `~/.rollcall/config.yaml`
//! Project-level config: `.rollcall/config.yaml` (next to the class roster)
//!
//! Resolution: CLI flags → project config → user config → built-in defaults.
//! Each top-level key present in a later layer replaces the earlier one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::engine::RollConfig;
use crate::roster::{Roster, RosterResult};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// One config layer. Every key is optional so layers can be merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollcallConfig {
    /// Inline roster names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roster: Vec<String>,
    /// Roster file (YAML list or one name per line). Wins over `roster`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster_file: Option<PathBuf>,
    /// Themes file (`.json` or YAML list of descriptors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes_file: Option<PathBuf>,
    /// Theme applied at startup, by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Fixed RNG seed for reproducible picks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<RollConfig>,
}

/// Path to `~/.rollcall/`.
fn dirs_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(".rollcall"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".rollcall"))
    }
}

/// Path to the user-level config file.
fn user_config_path() -> Option<PathBuf> {
    dirs_path().map(|p| p.join("config.yaml"))
}

const PROJECT_CONFIG_PATH: &str = ".rollcall/config.yaml";

impl RollcallConfig {
    /// Load and merge user + project config. Missing files are skipped;
    /// broken ones are logged and skipped.
    pub fn load() -> Self {
        let user = user_config_path();
        Self::load_layers(user.as_deref(), Path::new(PROJECT_CONFIG_PATH))
    }

    /// Merge `user` then `project`. Exposed for tests.
    pub fn load_layers(user: Option<&Path>, project: &Path) -> Self {
        let mut config = Self::default();
        for path in user.into_iter().chain(std::iter::once(project)) {
            if !path.exists() {
                continue;
            }
            match Self::load_from(path) {
                Ok(layer) => config = config.merged(layer),
                Err(e) => warn!("{e}; ignoring"),
            }
        }
        config
    }

    /// Parse a single config file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })
    }

    /// `other` layered on top of `self`.
    pub fn merged(mut self, other: Self) -> Self {
        if !other.roster.is_empty() {
            self.roster = other.roster;
        }
        if other.roster_file.is_some() {
            self.roster_file = other.roster_file;
        }
        if other.themes_file.is_some() {
            self.themes_file = other.themes_file;
        }
        if other.theme.is_some() {
            self.theme = other.theme;
        }
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        if other.timing.is_some() {
            self.timing = other.timing;
        }
        self
    }

    /// Roll timing, defaults when unset.
    pub fn timing(&self) -> RollConfig {
        self.timing.clone().unwrap_or_default()
    }

    /// Build the roster from `roster_file`, else the inline list.
    pub fn roster(&self) -> RosterResult<Roster> {
        match &self.roster_file {
            Some(path) => Roster::load(path),
            None => Ok(Roster::new(self.roster.iter().cloned())),
        }
    }
}
