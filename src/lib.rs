pub mod cli;
mod commands;
pub mod core;

use std::io::Write;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn run() -> ExitCode {
    let cli = Cli::parse_args();

    // Structured logging on stderr; stdout carries only the document.
    let default_filter = if cli.debug {
        "info,hydrate_lib=debug"
    } else {
        "warn,hydrate_lib=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Cannot start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(commands::dispatch(cli)) {
        Ok(document) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(document.as_bytes()) {
                tracing::error!("Cannot write output: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
