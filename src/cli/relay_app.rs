//! Relay runner

use std::process::ExitCode;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::config::AppConfig;
use crate::infrastructure::daemon::DaemonError;
use crate::infrastructure::relay::RelayError;
use crate::infrastructure::{BusRelay, DesktopDaemon, NotifyRustDisplay, SocketBus, SocketPath};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::notify_app::socket_path_for;
use super::presenter::Presenter;

/// Run the relay until Ctrl-C
pub async fn run_relay(config: AppConfig, display: bool) -> ExitCode {
    let presenter = Presenter::new();

    let socket_path = socket_path_for(&config);
    let mut relay = BusRelay::new(socket_path.clone());
    if let Err(e) = relay.bind() {
        match &e {
            RelayError::AlreadyRunning(path) => {
                presenter.error(&format!("A relay is already running on {}", path.display()));
            }
            _ => {
                presenter.error(&e.to_string());
            }
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let daemon = if display {
        match start_desktop_daemon(socket_path).await {
            Ok(handle) => Some(handle),
            Err(e) => {
                presenter.error(&format!("Failed to start notification daemon: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        None
    };

    presenter.info(&format!(
        "PID: {} | Socket: {} | Display: {} | Ctrl-C: exit",
        std::process::id(),
        relay.path().display(),
        if display { "on" } else { "off" }
    ));

    let code = tokio::select! {
        result = relay.run() => match result {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                presenter.error(&format!("Relay failed: {}", e));
                EXIT_ERROR
            }
        },
        _ = tokio::signal::ctrl_c() => {
            presenter.info("Shutting down relay");
            EXIT_SUCCESS
        }
    };

    if let Some(handle) = daemon {
        handle.abort();
    }

    ExitCode::from(code)
}

/// Connect a desktop daemon to our own relay and announce it
async fn start_desktop_daemon(socket_path: SocketPath) -> Result<JoinHandle<()>, DaemonError> {
    let (bus, inbound) = SocketBus::connect(socket_path).await?;
    let daemon = DesktopDaemon::new(Arc::new(bus), NotifyRustDisplay::new());
    daemon.start().await?;

    Ok(tokio::spawn(async move { daemon.run(inbound).await }))
}
