//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Name used when no application name is configured
pub const DEFAULT_APP_NAME: &str = "growl-shim";

/// Notification name used when no catalog is configured
pub const DEFAULT_NOTIFICATION: &str = "Notification";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name announced to the daemon
    pub app_name: Option<String>,
    /// Full notification catalog
    pub notifications: Option<Vec<String>>,
    /// Notifications enabled by default; unset means the full catalog
    pub default_notifications: Option<Vec<String>>,
    /// Path to the application icon
    pub icon: Option<String>,
    /// Path to the relay socket
    pub socket: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            notifications: Some(vec![DEFAULT_NOTIFICATION.to_string()]),
            default_notifications: None,
            icon: None,
            socket: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            app_name: other.app_name.or(self.app_name),
            notifications: other.notifications.or(self.notifications),
            default_notifications: other.default_notifications.or(self.default_notifications),
            icon: other.icon.or(self.icon),
            socket: other.socket.or(self.socket),
        }
    }

    /// Get the application name, or the crate name if not set
    pub fn app_name_or_default(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    /// Get the notification catalog, or a single generic entry if not set
    pub fn notifications_or_default(&self) -> Vec<String> {
        self.notifications
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_NOTIFICATION.to_string()])
    }
}

/// Split a comma-separated list, dropping empty entries
pub fn parse_name_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
