//! Shim session domain module

mod state;
mod subscriptions;

pub use state::{NotRegistered, ShimSession, ShimState};
pub use subscriptions::{Signal, SubscriptionPlan, SubscriptionTable};
