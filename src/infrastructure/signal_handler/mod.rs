//! Signal handler adapters
//!
//! `ChannelSignalHandler` logs clicks and timeouts and forwards them to
//! whoever holds the receiver.

use serde_json::Value;
use tokio::sync::mpsc;

use crate::application::ports::{ShimEvent, SignalHandler};

/// Forwards interaction signals as [`ShimEvent`]s
#[derive(Debug, Clone)]
pub struct ChannelSignalHandler {
    tx: mpsc::UnboundedSender<ShimEvent>,
}

impl ChannelSignalHandler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ShimEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, event: ShimEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("signal receiver dropped, event discarded");
        }
    }
}

impl SignalHandler for ChannelSignalHandler {
    fn on_clicked(&self, context: Option<Value>) {
        tracing::info!(?context, "notification clicked");
        self.forward(ShimEvent::Clicked(context));
    }

    fn on_timed_out(&self, context: Option<Value>) {
        tracing::info!(?context, "notification timed out");
        self.forward(ShimEvent::TimedOut(context));
    }
}
