//! Notify runner: register, post one notification, optionally wait for feedback

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::application::NotifierShim;
use crate::domain::config::AppConfig;
use crate::domain::notification::Icon;
use crate::infrastructure::{ChannelSignalHandler, SocketBus, SocketPath};

use super::app::{build_registration, EXIT_ERROR, EXIT_SUCCESS};
use super::args::NotifyArgs;
use super::presenter::Presenter;

/// Resolve the relay socket from config, falling back to the runtime dir
pub fn socket_path_for(config: &AppConfig) -> SocketPath {
    config
        .socket
        .as_deref()
        .map(SocketPath::from_path)
        .unwrap_or_default()
}

/// Run `notify`
pub async fn run_notify(config: AppConfig, args: NotifyArgs) -> ExitCode {
    let presenter = Presenter::new();

    let registration = match build_registration(&config).await {
        Ok(info) => info,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut options = args.options();
    if let Some(path) = args.icon.as_ref() {
        match Icon::load(path).await {
            Ok(icon) => options = options.icon(icon),
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    let socket_path = socket_path_for(&config);
    let (bus, inbound) = match SocketBus::connect(socket_path).await {
        Ok(connected) => connected,
        Err(e) => {
            presenter.error(&format!("{}. Start one with: growl-shim relay", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (handler, mut events) = ChannelSignalHandler::new();
    let shim = Arc::new(NotifierShim::new(bus, handler));

    let listener = {
        let shim = Arc::clone(&shim);
        tokio::spawn(async move {
            if let Err(e) = shim.listen(inbound).await {
                tracing::warn!(error = %e, "listener stopped");
            }
        })
    };

    let app_name = registration.app_name().to_string();
    if let Err(e) = shim.register(registration).await {
        presenter.error(&format!("Registration failed: {}", e));
        listener.abort();
        return ExitCode::from(EXIT_ERROR);
    }

    if let Err(e) = shim
        .notify(&args.name, &args.title, &args.description, options)
        .await
    {
        presenter.error(&format!("Notification failed: {}", e));
        listener.abort();
        return ExitCode::from(EXIT_ERROR);
    }
    presenter.success(&format!("Posted '{}' as {}", args.name, app_name));

    if args.wait > 0 {
        match timeout(Duration::from_secs(args.wait), events.recv()).await {
            Ok(Some(event)) => presenter.event(&event),
            Ok(None) => presenter.warn("Signal stream closed before any feedback arrived"),
            Err(_) => presenter.info("No click or timeout signal received"),
        }
    }

    if let Err(e) = shim.shutdown().await {
        tracing::debug!(error = %e, "unsubscribe on exit failed");
    }
    listener.abort();

    ExitCode::from(EXIT_SUCCESS)
}
