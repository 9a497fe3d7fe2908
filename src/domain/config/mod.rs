//! Configuration domain module

mod app_config;

pub use app_config::{parse_name_list, AppConfig, DEFAULT_APP_NAME, DEFAULT_NOTIFICATION};
