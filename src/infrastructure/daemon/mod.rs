//! Notification daemon infrastructure module
//!
//! A minimal daemon that consumes registrations and notifications from the
//! bus and shows them using notify-rust.

mod desktop;
mod display;

pub use desktop::{DaemonAction, DaemonError, DesktopDaemon, DEFAULT_FEEDBACK_DELAY};
pub use display::{DisplayError, NotificationDisplay, NotifyRustDisplay};
