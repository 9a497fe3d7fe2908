//! Notification bus adapters
//!
//! `MemoryBus` delivers within the process. `SocketBus` talks to a
//! [`BusRelay`](crate::infrastructure::relay::BusRelay) over a Unix socket so
//! separate processes can exchange notifications.

mod memory;
pub mod protocol;
#[cfg(unix)]
mod socket;

pub use memory::MemoryBus;
pub use protocol::RelayFrame;
#[cfg(unix)]
pub use socket::{SocketBus, SocketPath};
