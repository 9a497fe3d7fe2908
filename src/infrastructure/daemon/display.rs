//! Desktop display adapter using notify-rust
//!
//! Works on Windows, macOS, and Linux.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::wire::NotificationPayload;

/// Display errors
#[derive(Debug, Clone, Error)]
pub enum DisplayError {
    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// Something that can put a notification on screen
#[async_trait]
pub trait NotificationDisplay: Send + Sync {
    async fn show(&self, notification: &NotificationPayload) -> Result<(), DisplayError>;
}

/// Cross-platform display using notify-rust
#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyRustDisplay;

impl NotifyRustDisplay {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDisplay for NotifyRustDisplay {
    async fn show(&self, notification: &NotificationPayload) -> Result<(), DisplayError> {
        let app_name = notification.application_name.clone();
        let title = notification.title.clone();
        let body = notification.description.clone();
        #[cfg(all(unix, not(target_os = "macos")))]
        let priority = notification.priority;
        #[cfg(all(unix, not(target_os = "macos")))]
        let sticky = notification.is_sticky();

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut builder = notify_rust::Notification::new();
            builder.appname(&app_name).summary(&title).body(&body);

            #[cfg(all(unix, not(target_os = "macos")))]
            {
                builder.urgency(urgency_for(priority));
                if sticky {
                    builder.timeout(notify_rust::Timeout::Never);
                }
            }

            builder
                .show()
                .map_err(|e| DisplayError::SendFailed(e.to_string()))?;

            Ok(())
        })
        .await
        .map_err(|e| DisplayError::SendFailed(format!("Task join error: {}", e)))?
    }
}

/// Map a numeric priority onto freedesktop urgency
#[cfg(all(unix, not(target_os = "macos")))]
fn urgency_for(priority: i64) -> notify_rust::Urgency {
    match priority {
        p if p >= 2 => notify_rust::Urgency::Critical,
        p if p <= -1 => notify_rust::Urgency::Low,
        _ => notify_rust::Urgency::Normal,
    }
}

#[cfg(test)]
mod tests {
    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn urgency_mapping() {
        use super::urgency_for;
        use notify_rust::Urgency;

        assert_eq!(urgency_for(2), Urgency::Critical);
        assert_eq!(urgency_for(1), Urgency::Normal);
        assert_eq!(urgency_for(0), Urgency::Normal);
        assert_eq!(urgency_for(-1), Urgency::Low);
        assert_eq!(urgency_for(-2), Urgency::Low);
        assert_eq!(urgency_for(9), Urgency::Critical);
    }

    #[test]
    fn display_creates_successfully() {
        let _display = super::NotifyRustDisplay::new();
    }
}
