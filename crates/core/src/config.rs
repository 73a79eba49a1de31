//! Application Configuration
//!
//! Manages editor settings including:
//! - Editing mode selected at startup
//! - Defaults for new sections and questions
//! - Undo history depth
//! - Key/value storage backend for the paper details stash

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PaperError, Result};

/// Editing mode of the question paper page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Hand-authored questions; the question type whitelist is enforced
    #[default]
    Manual,
    /// Generation is delegated to an external form; no type whitelist
    AiAssisted,
}

impl EditMode {
    /// Tag passed to the external question generation form
    pub fn tag(&self) -> &'static str {
        match self {
            EditMode::Manual => "manual",
            EditMode::AiAssisted => "ai",
        }
    }

    /// Get the display name for the mode
    pub fn display_name(&self) -> &'static str {
        match self {
            EditMode::Manual => "Manual",
            EditMode::AiAssisted => "AI Assisted",
        }
    }

    /// Whether the question type whitelist applies in this mode
    pub fn restricts_types(&self) -> bool {
        matches!(self, EditMode::Manual)
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EditMode {
    type Err = PaperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(EditMode::Manual),
            "ai" | "ai-assisted" | "ai_assisted" => Ok(EditMode::AiAssisted),
            other => Err(PaperError::Config(format!("unknown edit mode: {}", other))),
        }
    }
}

/// Defaults applied by the editing state manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Mode the editor starts in
    pub default_mode: EditMode,
    /// Prefix of auto-numbered section names ("Section 1", "Section 2", ...)
    pub section_name_prefix: String,
    /// Marks given to new questions and child questions
    pub default_marks: i64,
    /// Difficulty label given to new top-level questions
    pub default_difficulty: String,
    /// Maximum number of snapshots kept for undo
    pub max_undo_history: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_mode: EditMode::Manual,
            section_name_prefix: "Section".to_string(),
            default_marks: 1,
            default_difficulty: "Easy".to_string(),
            max_undo_history: 100,
        }
    }
}

/// Backend used for the key/value store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local map, lost on exit
    Memory,
    /// JSON file in the data directory
    #[default]
    File,
}

/// Key/value storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which store implementation to use
    pub backend: StorageBackend,
    /// Key under which the paper details object is stashed
    pub stash_key: String,
    /// Explicit store file; defaults to `<data dir>/local_storage.json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            stash_key: "paperDetails".to_string(),
            path: None,
        }
    }
}

impl StorageConfig {
    /// Resolve the store file location
    pub fn resolve_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| AppConfig::data_dir().map(|dir| dir.join("local_storage.json")))
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration version for migrations
    pub version: u32,
    /// Editing defaults
    pub editor: EditorSettings,
    /// Storage settings
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            editor: EditorSettings::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "papereditor", "Paper Editor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "papereditor", "Paper Editor")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from the default location
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| PaperError::Config("Cannot determine config path".into()))?;
        Self::load_from(&config_file).await
    }

    /// Load configuration from a file, writing defaults if it does not exist
    pub async fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {:?}", path);
            let contents = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            info!("Config file not found, using defaults");
            let config = AppConfig::default();
            config.save_to(path).await?;
            Ok(config)
        }
    }

    /// Save configuration to the default location
    pub async fn save(&self) -> Result<()> {
        let config_file = Self::config_file()
            .ok_or_else(|| PaperError::Config("Cannot determine config path".into()))?;
        self.save_to(&config_file).await
    }

    /// Save configuration to a file
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }
}
