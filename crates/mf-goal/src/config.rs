//! Configuration for the shared container, display, and refresh signalling.
//!
//! Loaded from `config.toml`; every section and field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::store::DEFAULT_GOALS_KEY;

/// Top-level configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,
}

/// Shared container configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Name of the container shared with the host app
    #[serde(default = "default_suite")]
    pub suite: String,

    /// Key the goal list is stored under
    #[serde(default = "default_key")]
    pub key: String,

    /// Container directory override (defaults to <data_dir>/monthly-focus/<suite>)
    pub container_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            suite: default_suite(),
            key: default_key(),
            container_dir: None,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum number of goals in one snapshot; 0 is treated as 1
    #[serde(default = "default_max_goals")]
    pub max_goals: usize,

    /// Maximum lines a goal title may wrap onto
    #[serde(default = "default_title_lines")]
    pub title_lines: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_goals: default_max_goals(),
            title_lines: default_title_lines(),
        }
    }
}

/// When the host should ask for a new timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadAt {
    /// As soon as the last entry has been shown
    #[default]
    AtEnd,
    /// At the first instant of the next month
    NextMonth,
}

/// Refresh signal configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Signal file override (defaults to <container_dir>/refresh.jsonl)
    pub signal_file: Option<PathBuf>,

    #[serde(default)]
    pub reload: ReloadAt,
}

// Serde default functions
fn default_suite() -> String {
    "group.com.example.monthlyfocus".to_string()
}

fn default_key() -> String {
    DEFAULT_GOALS_KEY.to_string()
}

fn default_max_goals() -> usize {
    4
}

fn default_title_lines() -> usize {
    2
}

impl FocusConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, GoalError> {
        let content = std::fs::read_to_string(path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content)
            .map_err(|e| GoalError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load config, falling back to defaults if the file is missing
    ///
    /// A file that exists but doesn't parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, GoalError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Default location of config.toml
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("monthly-focus")
            .join("config.toml")
    }

    /// Directory of the shared container
    pub fn container_dir(&self) -> PathBuf {
        match &self.storage.container_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("monthly-focus")
                .join(&self.storage.suite),
        }
    }

    /// File the refresh signal is appended to
    pub fn signal_file(&self) -> PathBuf {
        self.refresh
            .signal_file
            .clone()
            .unwrap_or_else(|| self.container_dir().join("refresh.jsonl"))
    }
}
