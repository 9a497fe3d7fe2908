//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, logging setup,
//! and the command runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logging;
#[cfg(unix)]
pub mod notify_app;
pub mod presenter;
#[cfg(unix)]
pub mod relay_app;

// Re-export commonly used types
pub use app::{load_merged_config, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, NotifyArgs};
#[cfg(unix)]
pub use notify_app::run_notify;
pub use presenter::Presenter;
#[cfg(unix)]
pub use relay_app::run_relay;
