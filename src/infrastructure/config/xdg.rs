//! TOML config file under the user's config directory

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const CONFIG_DIR: &str = "growl-shim";
const CONFIG_FILE: &str = "config.toml";

/// Registration defaults stored at `$XDG_CONFIG_HOME/growl-shim/config.toml`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("~/.config"));
        Self {
            path: base.join(CONFIG_DIR).join(CONFIG_FILE),
        }
    }

    /// Store at an explicit file path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;
        Self::parse_toml(&content)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = Self::to_toml(config)?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes the app name and single-entry catalog used when nothing is configured
    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        self.save(&AppConfig::defaults()).await
    }
}
