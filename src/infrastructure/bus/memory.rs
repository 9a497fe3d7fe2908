//! In-process notification bus
//!
//! Delivers to this process only. Useful for tests and for embedding the
//! shim next to a daemon running in the same process.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{BusError, NotificationBus};
use crate::domain::wire::BusMessage;

struct MemoryBusInner {
    subscriptions: HashSet<String>,
    posted: Vec<BusMessage>,
    inbound: mpsc::UnboundedSender<BusMessage>,
}

/// Loopback bus that records every post
#[derive(Clone)]
pub struct MemoryBus {
    inner: Arc<Mutex<MemoryBusInner>>,
}

impl MemoryBus {
    /// Create a bus and the stream its subscribed messages arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BusMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bus = Self {
            inner: Arc::new(Mutex::new(MemoryBusInner {
                subscriptions: HashSet::new(),
                posted: Vec::new(),
                inbound: tx,
            })),
        };
        (bus, rx)
    }

    /// Inject a message as if another process had posted it.
    ///
    /// Returns true if a subscription matched and the message was queued.
    pub fn deliver(&self, message: BusMessage) -> bool {
        let inner = self.lock();
        if !inner.subscriptions.contains(&message.name) {
            return false;
        }
        inner.inbound.send(message).is_ok()
    }

    /// Every message posted so far, in order
    pub fn posted(&self) -> Vec<BusMessage> {
        self.lock().posted.clone()
    }

    /// Messages posted on one channel, in order
    pub fn posted_on(&self, name: &str) -> Vec<BusMessage> {
        self.lock()
            .posted
            .iter()
            .filter(|m| m.name == name)
            .cloned()
            .collect()
    }

    /// Subscribed channels, sorted
    pub fn subscriptions(&self) -> Vec<String> {
        let mut channels: Vec<String> = self.lock().subscriptions.iter().cloned().collect();
        channels.sort();
        channels
    }

    pub fn is_subscribed(&self, channel: &str) -> bool {
        self.lock().subscriptions.contains(channel)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryBusInner> {
        // Lock is held briefly and never across an await
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl NotificationBus for MemoryBus {
    async fn post(&self, message: BusMessage) -> Result<(), BusError> {
        let mut inner = self.lock();
        if inner.subscriptions.contains(&message.name) {
            // Receiver gone means nobody listens any more; the post still counts
            let _ = inner.inbound.send(message.clone());
        }
        inner.posted.push(message);
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<(), BusError> {
        self.lock().subscriptions.insert(channel.to_string());
        Ok(())
    }

    async fn unsubscribe(&self, channel: &str) -> Result<(), BusError> {
        self.lock().subscriptions.remove(channel);
        Ok(())
    }
}
