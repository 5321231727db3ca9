//! Defaults-file support.
//!
//! Flag defaults and a filename exclude list can be supplied via a TOML
//! file instead of repeating flags on every invocation. Command-line
//! flags always win over file-supplied defaults.
//!
//! # Configuration file format
//!
//! ```toml
//! [defaults]
//! recursive = false
//! force = false
//! overwrite = true
//!
//! [exclude]
//! filenames = [".DS_Store", "Thumbs.db"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during configuration loading.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the explicitly specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Defaults and exclusions loaded from a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Default values for flags the command line may override.
    #[serde(default)]
    pub defaults: DefaultFlags,

    /// Files removed from the candidate list before matching.
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// File-supplied default flag values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultFlags {
    /// Default for `-r`. Defaults to false.
    #[serde(default)]
    pub recursive: bool,

    /// Default for `-f`. Defaults to false.
    #[serde(default)]
    pub force: bool,

    /// Default overwrite policy; `-n` on the command line forces it off.
    /// Defaults to true.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

/// Helper function for default value of `overwrite`.
fn default_overwrite() -> bool {
    true
}

impl Default for DefaultFlags {
    fn default() -> Self {
        Self {
            recursive: false,
            force: false,
            overwrite: true,
        }
    }
}

/// Exact filenames excluded from enumeration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to exclude (e.g., ".DS_Store", "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,
}

impl ToolConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.refilerc.toml` in the current directory
    /// 3. Look for `~/.config/refile/config.toml` in the home directory
    /// 4. Fall back to the built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided
    /// but missing or malformed. An absent implicit file is not an error.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".refilerc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("refile")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Returns the exclude filenames as a set for candidate filtering.
    pub fn exclude_set(&self) -> HashSet<String> {
        self.exclude.filenames.iter().cloned().collect()
    }
}
