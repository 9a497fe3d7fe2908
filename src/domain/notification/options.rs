//! Per-notification options

use serde_json::Value;

use super::icon::Icon;
use super::priority::PriorityInput;

/// Optional settings for a single notification.
///
/// Every field defaults to "not set"; see each field for what that means.
#[derive(Debug, Clone, Default)]
pub struct NotifyOptions {
    /// Priority; `None` sends `0`
    pub priority: Option<PriorityInput>,
    /// Icon for this notification only; `None` lets the daemon use the registered icon
    pub icon: Option<Icon>,
    /// Keep the notification on screen until dismissed; `false` omits the marker
    pub sticky: bool,
    /// Value echoed back in the clicked / timed-out signal; `None`, `null` and
    /// `false` omit the context
    pub click_context: Option<Value>,
}

impl NotifyOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the priority
    pub fn priority(mut self, priority: impl Into<PriorityInput>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Override the icon for this notification
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Mark the notification sticky
    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    /// Attach a click context; `null` and `false` clear it
    pub fn click_context(mut self, context: impl Into<Value>) -> Self {
        self.click_context = Some(context.into()).filter(is_click_context);
        self
    }

    /// The click context to send, if it counts as set
    pub fn effective_click_context(&self) -> Option<&Value> {
        self.click_context.as_ref().filter(|c| is_click_context(c))
    }
}

fn is_click_context(context: &Value) -> bool {
    !matches!(context, Value::Null | Value::Bool(false))
}
