//! Application registration value object

use crate::domain::notification::Icon;

/// Everything the daemon needs to know about an application.
///
/// Built once and handed to the shim on `register`; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInfo {
    app_name: String,
    icon: Icon,
    notifications: Vec<String>,
    default_notifications: Vec<String>,
}

impl RegistrationInfo {
    /// Create a registration where every notification is enabled by default
    /// and the icon is empty.
    ///
    /// Names are not validated: an empty app name or a duplicate entry is
    /// passed through to the daemon as given.
    pub fn new<I, S>(app_name: impl Into<String>, notifications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let notifications: Vec<String> = notifications.into_iter().map(Into::into).collect();
        Self {
            app_name: app_name.into(),
            icon: Icon::empty(),
            default_notifications: notifications.clone(),
            notifications,
        }
    }

    /// Replace the default-enabled subset
    pub fn with_defaults<I, S>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_notifications = defaults.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the application icon
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    /// Full notification catalog, in registration order
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Notifications enabled by default, in registration order
    pub fn default_notifications(&self) -> &[String] {
        &self.default_notifications
    }

    /// Check if a notification name is part of the catalog
    pub fn contains(&self, name: &str) -> bool {
        self.notifications.iter().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_catalog() {
        let info = RegistrationInfo::new("Demo", ["Ping"]);
        assert_eq!(info.app_name(), "Demo");
        assert_eq!(info.notifications(), &["Ping".to_string()]);
        assert_eq!(info.default_notifications(), info.notifications());
        assert!(info.icon().is_empty());
    }

    #[test]
    fn explicit_defaults() {
        let info = RegistrationInfo::new("Demo", ["Ping", "Pong"]).with_defaults(["Ping"]);
        assert_eq!(info.notifications(), &["Ping".to_string(), "Pong".to_string()]);
        assert_eq!(info.default_notifications(), &["Ping".to_string()]);
    }

    #[test]
    fn contains_checks_catalog() {
        let info = RegistrationInfo::new("Demo", ["Ping", "Pong"]);
        assert!(info.contains("Pong"));
        assert!(!info.contains("Pang"));
    }

    #[test]
    fn with_icon_replaces_icon() {
        let info = RegistrationInfo::new("Demo", ["Ping"]).with_icon(Icon::new(vec![7]));
        assert_eq!(info.icon().data(), &[7]);
    }
}
