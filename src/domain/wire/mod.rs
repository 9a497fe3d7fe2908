//! Wire format for the notification bus

pub mod channels;
mod message;
mod payload;

pub use message::BusMessage;
pub use payload::{
    clicked_context, ClickContext, NotificationPayload, RegistrationPayload, CLICKED_CONTEXT_KEY,
};
