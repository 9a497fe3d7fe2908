//! Shared helpers for the CLI runners

use std::env;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::IconError;
use crate::domain::notification::Icon;
use crate::domain::registration::RegistrationInfo;
use crate::infrastructure::XdgConfigStore;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the configured application name
pub const APP_NAME_ENV: &str = "GROWL_SHIM_APP_NAME";

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, path = %store.path().display(), "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    let env_config = AppConfig {
        app_name: env::var(APP_NAME_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Build the registration announced to the daemon.
///
/// The configured icon, if any, is the application's default icon;
/// otherwise an empty image is sent.
pub async fn build_registration(config: &AppConfig) -> Result<RegistrationInfo, IconError> {
    let mut info = RegistrationInfo::new(config.app_name_or_default(), config.notifications_or_default());

    if let Some(defaults) = config.default_notifications.clone() {
        info = info.with_defaults(defaults);
    }
    if let Some(path) = config.icon.as_deref() {
        info = info.with_icon(Icon::load(path).await?);
    }

    Ok(info)
}
