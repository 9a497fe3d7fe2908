//! CLI presenter for output formatting

use colored::*;
use serde_json::Value;

use crate::application::ports::ShimEvent;

/// Presenter for CLI output formatting
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print a click / timeout signal to stdout
    pub fn event(&self, event: &ShimEvent) {
        self.output(&Self::format_event(event));
    }

    /// Format a click / timeout signal as `<kind>[ <context>]`
    pub fn format_event(event: &ShimEvent) -> String {
        let (kind, context) = match event {
            ShimEvent::Clicked(context) => ("clicked", context),
            ShimEvent::TimedOut(context) => ("timed-out", context),
        };
        match context {
            Some(Value::String(s)) => format!("{} {}", kind, s),
            Some(value) => format!("{} {}", kind, value),
            None => kind.to_string(),
        }
    }
}
