//! Registration domain module

mod info;

pub use info::RegistrationInfo;
