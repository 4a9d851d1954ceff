//! Configuration file support for the CLI.
//!
//! Loads CLI configuration from TOML files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rowdb_core::session::{SessionOptions, DEFAULT_MAX_SCRIPT_DEPTH};
use serde::Deserialize;

/// CLI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Prompt printed before each interactive read.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Whether line-editing history is loaded and saved.
    #[serde(default = "default_history")]
    pub history: bool,

    /// History file path.
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Maximum history size.
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// How deeply `.script` directives may nest.
    #[serde(default = "default_max_script_depth")]
    pub max_script_depth: usize,
}

fn default_prompt() -> String {
    "db> ".to_string()
}

fn default_history() -> bool {
    true
}

fn default_history_size() -> usize {
    1000
}

fn default_max_script_depth() -> usize {
    DEFAULT_MAX_SCRIPT_DEPTH
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            history: default_history(),
            history_file: None,
            history_size: default_history_size(),
            max_script_depth: default_max_script_depth(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads the default configuration file.
    ///
    /// Looks in the following locations:
    /// 1. `<config dir>/rowdb/config.toml`
    /// 2. `~/.rowdb/config.toml`
    /// 3. Returns default if not found
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".rowdb").join("config.toml");
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Returns the default configuration file path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("rowdb").join("config.toml"))
    }

    /// Returns the history file to use, or `None` when history is disabled.
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.history {
            return None;
        }
        self.history_file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("rowdb").join("history")))
    }

    /// Returns the session options described by this configuration.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            max_script_depth: self.max_script_depth,
        }
    }
}
