//! Error types for the paper editor
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for configuration, storage and other ambient services
#[derive(Error, Debug)]
pub enum PaperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for paper editor operations
pub type Result<T> = std::result::Result<T, PaperError>;

impl PaperError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            PaperError::Io(e) => format!("File operation failed: {}", e),
            PaperError::Config(msg) => format!("Configuration error: {}", msg),
            PaperError::Json(e) => format!("Stored data is not valid JSON: {}", e),
            PaperError::Store(msg) => format!("Could not access local storage: {}", msg),
            PaperError::NotFound(msg) => format!("Not found: {}", msg),
            _ => self.to_string(),
        }
    }
}
