//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{parse_name_list, AppConfig};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    presenter.output(&display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Validate and store a value under `key`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    match key {
        "notifications" | "default_notifications" => {
            let names = parse_name_list(trimmed);
            if key == "notifications" && names.is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "At least one notification name is required".to_string(),
                });
            }
            if key == "notifications" {
                config.notifications = Some(names);
            } else {
                config.default_notifications = Some(names);
            }
        }
        _ => {
            if trimmed.is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must not be empty".to_string(),
                });
            }
            let value = Some(trimmed.to_string());
            match key {
                "app_name" => config.app_name = value,
                "icon" => config.icon = value,
                "socket" => config.socket = value,
                _ => unreachable!(), // Already validated
            }
        }
    }
    Ok(())
}

/// Render a stored value for display; lists are comma-joined
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "app_name" => config.app_name.clone(),
        "notifications" => config.notifications.as_ref().map(|n| n.join(", ")),
        "default_notifications" => config.default_notifications.as_ref().map(|n| n.join(", ")),
        "icon" => config.icon.clone(),
        "socket" => config.socket.clone(),
        _ => None,
    }
}
