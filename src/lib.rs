//! growl-shim - a Growl-style notifier client
//!
//! Registers an application with a Growl-compatible notification daemon,
//! posts notifications to it over a distributed notification bus, and
//! routes the daemon's click and timeout feedback back to the caller.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Priorities, icons, registration info, wire payloads and the
//!   shim's session state
//! - **Application**: The `NotifierShim` use case and its port interfaces
//!   (notification bus, signal handler, config store)
//! - **Infrastructure**: Adapters (in-memory bus, Unix socket bus and relay,
//!   desktop daemon backed by notify-rust, XDG config store)
//! - **CLI**: Argument parsing, output formatting and the command runners

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
