//! Application layer - Use cases and port interfaces
//!
//! Contains the notifier shim and the trait definitions
//! for the notification bus and other external systems.

pub mod notifier;
pub mod ports;

// Re-export use cases
pub use notifier::{NotifierShim, PidSource, ShimError};
