//! Shim session state machine

use std::fmt;

use thiserror::Error;

use super::subscriptions::SubscriptionTable;
use crate::domain::registration::RegistrationInfo;

/// Shim states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShimState {
    #[default]
    Unregistered,
    Registered,
}

impl ShimState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unregistered => "unregistered",
            Self::Registered => "registered",
        }
    }
}

impl fmt::Display for ShimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an operation needs a registration that does not exist yet
#[derive(Debug, Clone, Error)]
#[error("cannot {action} before the application is registered")]
pub struct NotRegistered {
    pub action: String,
}

/// Shim session entity.
///
/// State machine:
///   UNREGISTERED -> REGISTERED (register)
///   REGISTERED -> REGISTERED (register again, daemon ready)
///   REGISTERED -> UNREGISTERED (shutdown)
#[derive(Debug, Default)]
pub struct ShimSession {
    registration: Option<RegistrationInfo>,
    subscriptions: SubscriptionTable,
}

impl ShimSession {
    /// Create a new unregistered session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ShimState {
        if self.registration.is_some() {
            ShimState::Registered
        } else {
            ShimState::Unregistered
        }
    }

    /// Store a registration, returning the one it replaces
    pub fn register(&mut self, info: RegistrationInfo) -> Option<RegistrationInfo> {
        self.registration.replace(info)
    }

    /// Current registration, or an error naming the attempted action
    pub fn registration(&self, action: &str) -> Result<&RegistrationInfo, NotRegistered> {
        self.registration.as_ref().ok_or_else(|| NotRegistered {
            action: action.to_string(),
        })
    }

    pub fn subscriptions(&self) -> &SubscriptionTable {
        &self.subscriptions
    }

    pub fn subscriptions_mut(&mut self) -> &mut SubscriptionTable {
        &mut self.subscriptions
    }

    /// Drop the registration and return the channels that were subscribed
    pub fn reset(&mut self) -> Vec<String> {
        self.registration = None;
        self.subscriptions.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Signal;

    #[test]
    fn new_session_is_unregistered() {
        let session = ShimSession::new();
        assert_eq!(session.state(), ShimState::Unregistered);
        assert!(session.subscriptions().is_empty());
    }

    #[test]
    fn register_enters_registered() {
        let mut session = ShimSession::new();
        assert!(session.register(RegistrationInfo::new("Demo", ["Ping"])).is_none());
        assert_eq!(session.state(), ShimState::Registered);
    }

    #[test]
    fn register_again_stays_registered() {
        let mut session = ShimSession::new();
        session.register(RegistrationInfo::new("Demo", ["Ping"]));

        let previous = session.register(RegistrationInfo::new("Demo2", ["Pong"]));
        assert_eq!(previous.unwrap().app_name(), "Demo");
        assert_eq!(session.state(), ShimState::Registered);
        assert_eq!(session.registration("notify").unwrap().app_name(), "Demo2");
    }

    #[test]
    fn registration_before_register_fails() {
        let session = ShimSession::new();
        let err = session.registration("notify").unwrap_err();
        assert_eq!(err.action, "notify");
        assert!(err.to_string().contains("notify"));
    }

    #[test]
    fn reset_returns_channels() {
        let mut session = ShimSession::new();
        session.register(RegistrationInfo::new("Demo", ["Ping"]));
        session.subscriptions_mut().insert("ready", Signal::DaemonReady);

        assert_eq!(session.reset(), vec!["ready"]);
        assert_eq!(session.state(), ShimState::Unregistered);
        assert!(session.subscriptions().is_empty());
    }

    #[test]
    fn state_display() {
        assert_eq!(ShimState::Unregistered.to_string(), "unregistered");
        assert_eq!(ShimState::Registered.to_string(), "registered");
    }
}
