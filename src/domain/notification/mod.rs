//! Notification domain module

mod icon;
mod options;
mod priority;

pub use icon::Icon;
pub use options::NotifyOptions;
pub use priority::{Priority, PriorityInput, ALL_PRIORITIES};
