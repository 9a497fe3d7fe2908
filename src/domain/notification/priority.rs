//! Notification priority value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidPriorityError;

/// All symbolic priorities, highest first
pub const ALL_PRIORITIES: &[Priority] = &[
    Priority::Emergency,
    Priority::High,
    Priority::Normal,
    Priority::Moderate,
    Priority::VeryLow,
];

/// Symbolic notification priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Emergency,
    High,
    #[default]
    Normal,
    Moderate,
    VeryLow,
}

impl Priority {
    /// Numeric level sent to the daemon, in `-2..=2`
    pub const fn level(&self) -> i64 {
        match self {
            Self::Emergency => 2,
            Self::High => 1,
            Self::Normal => 0,
            Self::Moderate => -1,
            Self::VeryLow => -2,
        }
    }

    /// Get the string identifier for this priority
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::High => "high",
            Self::Normal => "normal",
            Self::Moderate => "moderate",
            Self::VeryLow => "very_low",
        }
    }
}

impl FromStr for Priority {
    type Err = InvalidPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "emergency" => Ok(Self::Emergency),
            "high" => Ok(Self::High),
            "normal" => Ok(Self::Normal),
            "moderate" => Ok(Self::Moderate),
            "very_low" | "very-low" | "verylow" => Ok(Self::VeryLow),
            _ => Err(InvalidPriorityError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority as supplied by a caller.
///
/// A raw integer bypasses the symbolic table and is sent unchanged.
/// A name that does not match any [`Priority`] resolves to `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityInput {
    Level(Priority),
    Named(String),
    Raw(i64),
}

impl PriorityInput {
    /// Resolve to the numeric level placed in `NotificationPriority`
    pub fn resolve(&self) -> i64 {
        match self {
            Self::Level(priority) => priority.level(),
            Self::Named(name) => name.parse::<Priority>().map(|p| p.level()).unwrap_or(0),
            Self::Raw(level) => *level,
        }
    }

    /// Resolve an optional input, defaulting to `0` when absent
    pub fn resolve_or_default(input: Option<&Self>) -> i64 {
        input.map(Self::resolve).unwrap_or(0)
    }
}

impl From<Priority> for PriorityInput {
    fn from(priority: Priority) -> Self {
        Self::Level(priority)
    }
}

impl From<i64> for PriorityInput {
    fn from(level: i64) -> Self {
        Self::Raw(level)
    }
}

impl From<&str> for PriorityInput {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl FromStr for PriorityInput {
    type Err = std::convert::Infallible;

    /// Integers become `Raw`, anything else is kept as a name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(level) => Self::Raw(level),
            Err(_) => Self::Named(s.to_string()),
        })
    }
}
