//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: notification
//! buses, the Unix socket relay, the desktop daemon, signal handlers and
//! config storage.

pub mod bus;
pub mod config;
pub mod daemon;
#[cfg(unix)]
pub mod relay;
pub mod signal_handler;

// Re-export adapters
pub use bus::MemoryBus;
#[cfg(unix)]
pub use bus::{SocketBus, SocketPath};
pub use config::XdgConfigStore;
pub use daemon::{DesktopDaemon, NotifyRustDisplay};
#[cfg(unix)]
pub use relay::BusRelay;
pub use signal_handler::ChannelSignalHandler;
