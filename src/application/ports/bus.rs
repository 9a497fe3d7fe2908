//! Notification bus port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::wire::BusMessage;

/// Notification bus errors
#[derive(Debug, Clone, Error)]
pub enum BusError {
    #[error("Not connected to notification bus: {0}")]
    NotConnected(String),

    #[error("Failed to send on notification bus: {0}")]
    SendFailed(String),

    #[error("Failed to encode bus message: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for BusError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e.to_string())
    }
}

/// Port for a distributed publish/subscribe notification bus.
///
/// Implementations deliver messages for subscribed channels through their own
/// inbound stream (see the adapters); delivery may be unordered across
/// processes and a message may arrive more than once.
#[async_trait]
pub trait NotificationBus: Send + Sync {
    /// Post a message to every observer of `message.name`
    async fn post(&self, message: BusMessage) -> Result<(), BusError>;

    /// Start receiving messages posted on `channel`
    async fn subscribe(&self, channel: &str) -> Result<(), BusError>;

    /// Stop receiving messages posted on `channel`
    async fn unsubscribe(&self, channel: &str) -> Result<(), BusError>;
}
