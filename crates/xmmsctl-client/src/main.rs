//! xmmsctl CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use xmmsctl_client::cli::{Cli, Command};
use xmmsctl_client::commands;
use xmmsctl_client::config::ClientConfig;
use xmmsctl_client::error::{ClientError, ClientResult};
use xmmsctl_client::session::with_remote;
use xmmsctl_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    }
    .with_format(cli.log_format.into());
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    // Run the command
    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)
    } else {
        ClientConfig::load().map_err(ClientError::Config)
    }
}

fn run(cli: &Cli, config: &ClientConfig) -> ClientResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Command::Config { action } => commands::run_config(action, config, &mut out),
        command => {
            let options = cli.connect_options(config);
            debug!(session = options.session, library = ?options.library, "connecting");
            with_remote(&options, |remote| {
                commands::run(remote, command, config, &mut out)
            })
        }
    };
    out.flush()?;
    result
}
