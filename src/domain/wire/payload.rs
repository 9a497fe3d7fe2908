//! Payloads exchanged with the notification daemon
//!
//! Field names are the daemon's wire contract and must not change.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::notification::{Icon, NotifyOptions, PriorityInput};
use crate::domain::registration::RegistrationInfo;

/// Key under which the daemon echoes a click context back
pub const CLICKED_CONTEXT_KEY: &str = "ClickedContext";

/// Posted on the application registration channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegistrationPayload {
    pub application_name: String,
    pub application_icon: Icon,
    pub all_notifications: Vec<String>,
    pub default_notifications: Vec<String>,
}

impl From<&RegistrationInfo> for RegistrationPayload {
    fn from(info: &RegistrationInfo) -> Self {
        Self {
            application_name: info.app_name().to_string(),
            application_icon: info.icon().clone(),
            all_notifications: info.notifications().to_vec(),
            default_notifications: info.default_notifications().to_vec(),
        }
    }
}

/// Caller value attached to a notification and echoed back on click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickContext {
    pub user_click_context: Value,
}

/// Posted on the new notification channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    #[serde(rename = "NotificationName")]
    pub name: String,
    #[serde(rename = "NotificationTitle")]
    pub title: String,
    #[serde(rename = "NotificationDescription")]
    pub description: String,
    #[serde(rename = "NotificationPriority")]
    pub priority: i64,
    #[serde(rename = "ApplicationName")]
    pub application_name: String,
    #[serde(rename = "ApplicationPID")]
    pub application_pid: u32,
    #[serde(
        rename = "NotificationIcon",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub icon: Option<Icon>,
    #[serde(
        rename = "NotificationSticky",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sticky: Option<u8>,
    #[serde(
        rename = "NotificationClickContext",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub click_context: Option<ClickContext>,
}

impl NotificationPayload {
    /// Build the payload for one notification.
    ///
    /// `application_pid` must be the process id read at publish time.
    pub fn build(
        name: &str,
        title: &str,
        description: &str,
        options: NotifyOptions,
        application_name: &str,
        application_pid: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            priority: PriorityInput::resolve_or_default(options.priority.as_ref()),
            application_name: application_name.to_string(),
            application_pid,
            click_context: options
                .effective_click_context()
                .cloned()
                .map(|user_click_context| ClickContext { user_click_context }),
            icon: options.icon,
            sticky: options.sticky.then_some(1),
        }
    }

    /// Check if the sticky marker is set
    pub fn is_sticky(&self) -> bool {
        self.sticky.is_some_and(|s| s != 0)
    }
}

/// Extract the caller's click context from a clicked / timed-out signal payload
pub fn clicked_context(info: &Value) -> Option<Value> {
    info.get(CLICKED_CONTEXT_KEY)?
        .get("user_click_context")
        .cloned()
}
