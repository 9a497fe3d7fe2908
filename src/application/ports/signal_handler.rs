//! Port for reacting to notification interaction signals

use serde_json::Value;

/// Interaction reported by the daemon for one of our notifications
#[derive(Debug, Clone, PartialEq)]
pub enum ShimEvent {
    Clicked(Option<Value>),
    TimedOut(Option<Value>),
}

/// Receives clicked / timed-out signals.
///
/// `context` is the click context attached in `notify`, if the daemon echoed it.
/// Handlers run on the task that drives the shim's listener and should not block.
pub trait SignalHandler: Send + Sync {
    fn on_clicked(&self, context: Option<Value>);

    fn on_timed_out(&self, context: Option<Value>);
}
