use crate::nav::history::DEFAULT_HISTORY_LIMIT;
use crate::services::log_dirs::APP_DIR_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory opened at startup; environment placeholders are allowed.
    /// Defaults to the home directory.
    #[serde(default)]
    pub start_directory: Option<String>,

    #[serde(default)]
    pub tree: TreeConfig,

    /// Number of visited locations remembered for back/forward
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Show dot-files in the contents listing
    #[serde(default = "default_false")]
    pub show_hidden: bool,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_false() -> bool {
    false
}

/// Directory tree pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Width of the tree pane as a percentage of the screen
    #[serde(default = "default_tree_width")]
    pub width_percent: u16,
}

fn default_tree_width() -> u16 {
    30
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            width_percent: default_tree_width(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_directory: None,
            tree: TreeConfig::default(),
            history_limit: default_history_limit(),
            show_hidden: default_false(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.json"))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults.
    ///
    /// A missing file is normal; any other problem is logged.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Pretty JSON, as written by `save_to_file`
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(10..=90).contains(&self.tree.width_percent) {
            return Err(ConfigError::ValidationError(
                "tree.width_percent must be between 10 and 90".to_string(),
            ));
        }

        if self.history_limit == 0 {
            return Err(ConfigError::ValidationError(
                "history_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
