//! Configuration loading.
//!
//! Layered precedence: built-in defaults -> `proto-stage.toml` -> CLI flags.
//! CLI flags are applied by the caller after `Settings::load` returns.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compile::CompileSettings;
use crate::error::StageError;
use crate::staging::{CollisionPolicy, DEFAULT_PREFIX};

/// Config file name looked up in the scan root.
pub const CONFIG_FILE: &str = "proto-stage.toml";

/// Staging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingSettings {
    /// Prefix of the timestamped staging directory name.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// What to do when two sources share a base name.
    #[serde(default)]
    pub on_collision: CollisionPolicy,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for StagingSettings {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            on_collision: CollisionPolicy::default(),
        }
    }
}

/// Main application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Staging behavior.
    #[serde(default)]
    pub staging: StagingSettings,

    /// Compiler behavior.
    #[serde(default)]
    pub compile: CompileSettings,
}

impl Settings {
    /// Load settings for a run rooted at `root`.
    ///
    /// With an explicit `config_path` the file must exist and parse. Without
    /// one, `<root>/proto-stage.toml` is read if present, otherwise the
    /// defaults stand.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self, StageError> {
        let (path, required) = match config_path {
            Some(path) => (path.to_path_buf(), true),
            None => (root.join(CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(StageError::config_at(path, "config file not found"));
            }
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path).map_err(|e| StageError::io_at(&path, e))?;
        toml::from_str(&raw).map_err(|e| StageError::config_at(path, e.to_string()))
    }
}
