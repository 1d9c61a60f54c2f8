//! Error types for Taskbind

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using TaskbindError
pub type Result<T> = std::result::Result<T, TaskbindError>;

/// Main error type for Taskbind operations
#[derive(Debug, Error)]
pub enum TaskbindError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Task or modifier document errors
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reading task specs and modifiers from disk
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document file not found
    #[error("Document not found at {0}")]
    NotFound(PathBuf),

    /// Document could not be parsed in its format
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// IO error
    #[error("IO error reading document: {0}")]
    Io(#[from] std::io::Error),
}
