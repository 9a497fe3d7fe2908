//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod bus;
pub mod config;
pub mod signal_handler;

// Re-export common types
pub use bus::{BusError, NotificationBus};
pub use config::ConfigStore;
pub use signal_handler::{ShimEvent, SignalHandler};
