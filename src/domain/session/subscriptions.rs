//! Subscription table: bus channel name to inbound signal kind

use std::collections::HashMap;
use std::fmt;

/// Inbound signals the shim reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    DaemonReady,
    Clicked,
    TimedOut,
}

impl Signal {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DaemonReady => "daemon-ready",
            Self::Clicked => "clicked",
            Self::TimedOut => "timed-out",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Changes needed to move a table to a desired set of routes
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SubscriptionPlan {
    pub subscribe: Vec<(String, Signal)>,
    pub unsubscribe: Vec<String>,
}

impl SubscriptionPlan {
    pub fn is_empty(&self) -> bool {
        self.subscribe.is_empty() && self.unsubscribe.is_empty()
    }
}

/// Routes from channel name to signal kind.
///
/// Each channel appears at most once, so re-registering never stacks
/// duplicate observers on the bus.
#[derive(Debug, Default)]
pub struct SubscriptionTable {
    routes: HashMap<String, Signal>,
}

impl SubscriptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route. Returns false if the channel was already routed.
    pub fn insert(&mut self, channel: impl Into<String>, signal: Signal) -> bool {
        let channel = channel.into();
        if self.routes.contains_key(&channel) {
            return false;
        }
        self.routes.insert(channel, signal);
        true
    }

    pub fn remove(&mut self, channel: &str) -> Option<Signal> {
        self.routes.remove(channel)
    }

    /// Look up the signal for an inbound message name
    pub fn route(&self, channel: &str) -> Option<Signal> {
        self.routes.get(channel).copied()
    }

    /// Routed channel names, sorted
    pub fn channels(&self) -> Vec<String> {
        let mut channels: Vec<String> = self.routes.keys().cloned().collect();
        channels.sort();
        channels
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Remove every route, returning the channel names
    pub fn drain(&mut self) -> Vec<String> {
        let mut channels: Vec<String> = self.routes.drain().map(|(channel, _)| channel).collect();
        channels.sort();
        channels
    }

    /// Compute what must change for the table to hold exactly `desired`.
    ///
    /// A channel routed to a different signal is both unsubscribed and
    /// subscribed again.
    pub fn plan(&self, desired: &[(String, Signal)]) -> SubscriptionPlan {
        let mut unsubscribe: Vec<String> = self
            .routes
            .iter()
            .filter(|(channel, signal)| {
                !desired
                    .iter()
                    .any(|(c, s)| c == *channel && s == *signal)
            })
            .map(|(channel, _)| channel.clone())
            .collect();
        unsubscribe.sort();

        let subscribe = desired
            .iter()
            .filter(|(channel, signal)| self.route(channel) != Some(*signal))
            .cloned()
            .collect();

        SubscriptionPlan {
            subscribe,
            unsubscribe,
        }
    }
}
