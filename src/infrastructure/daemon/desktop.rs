//! Daemon side of the bus: accepts registrations and shows notifications

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::mpsc;

use super::display::{DisplayError, NotificationDisplay};
use crate::application::ports::{BusError, NotificationBus};
use crate::domain::wire::{
    channels, BusMessage, NotificationPayload, RegistrationPayload, CLICKED_CONTEXT_KEY,
};

/// How long a non-sticky notification stays up before its timed-out signal
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_secs(5);

/// Errors from the desktop daemon
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("Notification bus error: {0}")]
    Bus(#[from] BusError),

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Display(#[from] DisplayError),
}

/// What the daemon did with an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaemonAction {
    Registered(String),
    Shown(String),
    /// App not registered, or the notification is not enabled for it
    Skipped(String),
    Ignored,
}

/// Notification daemon that displays notifications on the desktop.
///
/// Only notifications listed in an application's default set are shown.
/// Notifications carrying a click context get a timed-out signal after
/// the feedback delay unless they are sticky.
pub struct DesktopDaemon<B, D>
where
    B: NotificationBus + 'static,
    D: NotificationDisplay,
{
    bus: Arc<B>,
    display: D,
    apps: Mutex<HashMap<String, RegistrationPayload>>,
    feedback_delay: Duration,
}

impl<B, D> DesktopDaemon<B, D>
where
    B: NotificationBus + 'static,
    D: NotificationDisplay,
{
    pub fn new(bus: Arc<B>, display: D) -> Self {
        Self {
            bus,
            display,
            apps: Mutex::new(HashMap::new()),
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
        }
    }

    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    /// Subscribe to registrations and notifications, then announce readiness
    pub async fn start(&self) -> Result<(), DaemonError> {
        self.bus.subscribe(channels::APPLICATION_REGISTRATION).await?;
        self.bus.subscribe(channels::NEW_NOTIFICATION).await?;
        self.bus.post(BusMessage::signal(channels::DAEMON_READY)).await?;
        tracing::info!("notification daemon ready");
        Ok(())
    }

    /// Names of registered applications, sorted
    pub fn registered_apps(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock_apps().keys().cloned().collect();
        names.sort();
        names
    }

    /// Handle one inbound message
    pub async fn handle(&self, message: &BusMessage) -> Result<DaemonAction, DaemonError> {
        match message.name.as_str() {
            channels::APPLICATION_REGISTRATION => {
                let payload: RegistrationPayload = message.decode()?;
                let name = payload.application_name.clone();
                tracing::info!(
                    app = %name,
                    notifications = payload.all_notifications.len(),
                    "application registered"
                );
                self.lock_apps().insert(name.clone(), payload);
                Ok(DaemonAction::Registered(name))
            }
            channels::NEW_NOTIFICATION => {
                let payload: NotificationPayload = message.decode()?;
                if !self.is_enabled(&payload) {
                    tracing::debug!(
                        app = %payload.application_name,
                        name = %payload.name,
                        "notification not enabled, skipping"
                    );
                    return Ok(DaemonAction::Skipped(payload.name));
                }

                self.display.show(&payload).await?;
                self.schedule_timed_out(&payload);
                Ok(DaemonAction::Shown(payload.name))
            }
            _ => Ok(DaemonAction::Ignored),
        }
    }

    /// Handle inbound messages until the stream closes.
    ///
    /// Failures on individual messages are logged and do not stop the loop.
    pub async fn run(&self, mut inbound: mpsc::UnboundedReceiver<BusMessage>) {
        while let Some(message) = inbound.recv().await {
            if let Err(e) = self.handle(&message).await {
                tracing::warn!(name = %message.name, error = %e, "failed to handle message");
            }
        }
    }

    fn is_enabled(&self, payload: &NotificationPayload) -> bool {
        self.lock_apps()
            .get(&payload.application_name)
            .is_some_and(|app| app.default_notifications.contains(&payload.name))
    }

    fn schedule_timed_out(&self, payload: &NotificationPayload) {
        let Some(context) = payload.click_context.as_ref() else {
            return;
        };
        if payload.is_sticky() {
            return;
        }

        let channel = channels::timed_out_channel(&payload.application_name, payload.application_pid);
        let info: Value = json!({ CLICKED_CONTEXT_KEY: context });
        let bus = Arc::clone(&self.bus);
        let delay = self.feedback_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = bus.post(BusMessage::new(channel, info)).await {
                tracing::warn!(error = %e, "failed to post timed-out signal");
            }
        });
    }

    fn lock_apps(&self) -> std::sync::MutexGuard<'_, HashMap<String, RegistrationPayload>> {
        self.apps.lock().unwrap_or_else(|e| e.into_inner())
    }
}
