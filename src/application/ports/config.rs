//! Configuration storage port

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Persistent store for the shim's registration defaults
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored configuration; a missing file yields an empty config
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Write the configuration, creating parent directories as needed
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the default configuration. Fails if the file already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
