//! Keysmith - named secrets in the macOS keychain.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keysmith::cli::{execute, output, suggestion, Cli};
use keysmith::core::constants;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keysmith=debug")
        } else {
            EnvFilter::new("keysmith=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let command = cli.command.clone();
    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&command, &e) {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
