//! Domain error types

use thiserror::Error;

/// Error when parsing a symbolic priority
#[derive(Debug, Clone, Error)]
#[error("Invalid priority: \"{input}\". Valid priorities are: emergency, high, normal, moderate, very_low")]
pub struct InvalidPriorityError {
    pub input: String,
}

/// Error when an icon file cannot be read
#[derive(Debug, Clone, Error)]
#[error("Failed to read icon '{path}': {message}")]
pub struct IconError {
    pub path: String,
    pub message: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
