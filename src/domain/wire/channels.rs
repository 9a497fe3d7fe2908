//! Well-known channel names on the notification bus

/// Posted by the daemon when it starts (or restarts)
pub const DAEMON_READY: &str = "Lend Me Some Sugar; I Am Your Neighbor!";

/// Application registration channel
pub const APPLICATION_REGISTRATION: &str = "GrowlApplicationRegistrationNotification";

/// New notification channel
pub const NEW_NOTIFICATION: &str = "GrowlNotification";

const CLICKED_SUFFIX: &str = "GrowlClicked!";
const TIMED_OUT_SUFFIX: &str = "GrowlTimedOut!";

/// Channel the daemon posts to when one of this process's notifications is clicked
pub fn clicked_channel(app_name: &str, pid: u32) -> String {
    format!("{}-{}-{}", app_name, pid, CLICKED_SUFFIX)
}

/// Channel the daemon posts to when one of this process's notifications times out
pub fn timed_out_channel(app_name: &str, pid: u32) -> String {
    format!("{}-{}-{}", app_name, pid, TIMED_OUT_SUFFIX)
}
