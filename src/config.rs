//! Optional start-up configuration.
//!
//! A JSON file can replace the starter roster and the default avatar URL.
//! It is read once and never written back.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::ledger::{sample_friends, Ledger, DEFAULT_IMAGE_URL};
use crate::types::Friend;

/// Returns the default config file location.
///
/// On Linux: ~/.config/split-ledger/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("split-ledger")
        .join("config.json")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefilled avatar URL in the add-friend form.
    pub default_image_url: String,
    /// Starting roster.
    pub friends: Vec<Friend>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
            friends: sample_friends(),
        }
    }
}

impl Config {
    /// Load config from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing file at the default
    /// location is not an error and yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(p) => Config::from_file(p),
            None => {
                let p = default_config_path();
                match Config::from_file(&p) {
                    Err(ConfigError::Io { source, .. })
                        if source.kind() == io::ErrorKind::NotFound =>
                    {
                        debug!(path = %p.display(), "no config file, using defaults");
                        Ok(Config::default())
                    }
                    other => other,
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::parse(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!(path = %path.display(), friends = config.friends.len(), "config loaded");
        Ok(config)
    }

    /// Parse config JSON. Friend ids must be unique.
    pub fn parse(json: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;

        let mut seen = HashSet::new();
        if let Some(dup) = config.friends.iter().find(|f| !seen.insert(f.id.clone())) {
            return Err(ConfigError::DuplicateId(dup.id.clone()));
        }
        Ok(config)
    }

    /// A fresh ledger over the configured roster.
    pub fn ledger(&self) -> Ledger {
        Ledger::new(self.friends.clone())
    }
}

// ============================================================================
// TESTS
// ============================================================================
