//! Domain layer - Core notification model
//!
//! Contains value objects, wire payloads, the session state machine and
//! domain errors. This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod notification;
pub mod registration;
pub mod session;
pub mod wire;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use notification::{Icon, NotifyOptions, Priority, PriorityInput};
pub use registration::RegistrationInfo;
pub use session::{ShimSession, ShimState, Signal};
pub use wire::{BusMessage, NotificationPayload, RegistrationPayload};
