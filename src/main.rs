//! growl-shim CLI entry point

use std::process::ExitCode;

use clap::Parser;

#[cfg(unix)]
use growl_shim::cli::{run_notify, run_relay};
use growl_shim::cli::{
    app::{load_merged_config, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging::{init_tracing, QUIET_FILTER, RELAY_FILTER},
    presenter::Presenter,
};
use growl_shim::domain::config::{parse_name_list, AppConfig};
use growl_shim::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let presenter = Presenter::new();

    init_tracing(match cli.command {
        Commands::Relay { .. } => RELAY_FILTER,
        _ => QUIET_FILTER,
    });

    // Build CLI config from args
    let mut cli_config = AppConfig {
        socket: cli.socket.as_ref().map(|p| p.to_string_lossy().to_string()),
        ..AppConfig::empty()
    };

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Notify(args) => {
            cli_config.app_name = args.app_name.clone();
            cli_config.notifications = args.notifications.as_deref().map(parse_name_list);
            let config = load_merged_config(cli_config).await;
            run_notify(config, args).await
        }
        Commands::Relay { display } => {
            let config = load_merged_config(cli_config).await;
            run_relay(config, display).await
        }
    }
}

#[cfg(not(unix))]
async fn run_notify(_config: AppConfig, _args: growl_shim::cli::NotifyArgs) -> ExitCode {
    Presenter::new().error("notify requires Unix domain sockets");
    ExitCode::from(EXIT_ERROR)
}

#[cfg(not(unix))]
async fn run_relay(_config: AppConfig, _display: bool) -> ExitCode {
    Presenter::new().error("relay requires Unix domain sockets");
    ExitCode::from(EXIT_ERROR)
}
