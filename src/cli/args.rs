//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::domain::notification::{NotifyOptions, PriorityInput};

/// growl-shim - post desktop notifications through a Growl-style daemon
#[derive(Parser, Debug)]
#[command(name = "growl-shim")]
#[command(version)]
#[command(about = "Register with a Growl-style notification daemon and post notifications")]
#[command(long_about = None)]
pub struct Cli {
    /// Relay socket path (default: $XDG_RUNTIME_DIR/growl-shim.sock)
    #[arg(long, global = true, value_name = "PATH", env = "GROWL_SHIM_SOCKET")]
    pub socket: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the application and post one notification
    Notify(NotifyArgs),
    /// Run the notification bus relay
    Relay {
        /// Also act as the notification daemon and show notifications on the desktop
        #[arg(long)]
        display: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `notify`
#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Notification name, normally one of the registered notifications
    pub name: String,

    /// Notification title
    pub title: String,

    /// Notification description
    pub description: String,

    /// Priority: emergency, high, normal, moderate, very_low, or an integer
    #[arg(short, long, value_name = "PRIORITY", allow_hyphen_values = true)]
    pub priority: Option<String>,

    /// Keep the notification on screen until dismissed
    #[arg(short, long)]
    pub sticky: bool,

    /// Value echoed back when the notification is clicked (JSON or plain text)
    #[arg(long, value_name = "VALUE")]
    pub click_context: Option<String>,

    /// Icon for this notification only
    #[arg(long, value_name = "PATH")]
    pub icon: Option<PathBuf>,

    /// Application name to register as
    #[arg(long, value_name = "NAME")]
    pub app_name: Option<String>,

    /// Notification names to register (comma-separated)
    #[arg(long, value_name = "NAMES")]
    pub notifications: Option<String>,

    /// Seconds to wait for a click or timeout signal
    #[arg(short, long, value_name = "SECS", default_value_t = 0)]
    pub wait: u64,
}

impl NotifyArgs {
    /// Build notification options, leaving the icon override to the caller
    pub fn options(&self) -> NotifyOptions {
        let mut options = NotifyOptions::new().sticky(self.sticky);
        if let Some(priority) = self.priority.as_deref() {
            options = options.priority(parse_priority(priority));
        }
        if let Some(context) = self.click_context.as_deref() {
            options = options.click_context(parse_click_context(context));
        }
        options
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "app_name",
    "notifications",
    "default_notifications",
    "icon",
    "socket",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

/// Integers pass through as raw levels; anything else is a symbolic name
pub fn parse_priority(value: &str) -> PriorityInput {
    match value.parse::<PriorityInput>() {
        Ok(input) => input,
        Err(never) => match never {},
    }
}

/// Parse a click context as JSON, falling back to a plain string
pub fn parse_click_context(value: &str) -> Value {
    serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    use crate::domain::notification::Priority;

    #[test]
    fn cli_parses_notify() {
        let cli = Cli::parse_from(["growl-shim", "notify", "Ping", "Hi", "desc"]);
        let Commands::Notify(args) = cli.command else {
            panic!("Expected Notify command");
        };
        assert_eq!(args.name, "Ping");
        assert_eq!(args.title, "Hi");
        assert_eq!(args.description, "desc");
        assert!(args.priority.is_none());
        assert!(!args.sticky);
        assert_eq!(args.wait, 0);
    }

    #[test]
    fn cli_parses_notify_options() {
        let cli = Cli::parse_from([
            "growl-shim",
            "notify",
            "Ping",
            "Hi",
            "desc",
            "-p",
            "high",
            "--sticky",
            "--click-context",
            "abc",
            "--wait",
            "10",
        ]);
        let Commands::Notify(args) = cli.command else {
            panic!("Expected Notify command");
        };

        let options = args.options();
        assert_eq!(options.priority, Some(PriorityInput::Named("high".to_string())));
        assert_eq!(options.priority.as_ref().map(PriorityInput::resolve), Some(Priority::High.level()));
        assert!(options.sticky);
        assert_eq!(options.click_context, Some(json!("abc")));
        assert_eq!(args.wait, 10);
    }

    #[test]
    fn cli_parses_negative_priority() {
        let cli = Cli::parse_from(["growl-shim", "notify", "Ping", "Hi", "desc", "-p", "-2"]);
        let Commands::Notify(args) = cli.command else {
            panic!("Expected Notify command");
        };
        assert_eq!(args.options().priority, Some(PriorityInput::Raw(-2)));
    }

    #[test]
    fn cli_parses_relay() {
        let cli = Cli::parse_from(["growl-shim", "relay", "--display"]);
        assert!(matches!(cli.command, Commands::Relay { display: true }));
    }

    #[test]
    fn cli_parses_global_socket() {
        let cli = Cli::parse_from(["growl-shim", "relay", "--socket", "/tmp/x.sock"]);
        assert_eq!(cli.socket, Some(PathBuf::from("/tmp/x.sock")));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["growl-shim", "config", "set", "app_name", "Demo"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "app_name");
            assert_eq!(value, "Demo");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn click_context_json_or_string() {
        assert_eq!(parse_click_context("abc"), json!("abc"));
        assert_eq!(parse_click_context("42"), json!(42));
        assert_eq!(parse_click_context(r#"{"id":1}"#), json!({ "id": 1 }));
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("app_name"));
        assert!(is_valid_config_key("default_notifications"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
