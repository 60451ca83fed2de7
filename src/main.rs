//! Boosta CLI
//!
//! Results and progress records go to stdout as JSON; logs go to stderr,
//! filtered by `BOOSTA_LOG` (default `boosta=warn`).

use std::process::ExitCode;
use std::sync::Arc;

use boosta::cli::Cli;
use boosta::{commands, StdoutOutput, TokioClock};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("BOOSTA_LOG").unwrap_or_else(|_| "boosta=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = match commands::connect(cli.client_builder()) {
        Ok(client) => client,
        Err(code) => return ExitCode::from(code),
    };

    let code = commands::run(cli.command, &client, &TokioClock, Arc::new(StdoutOutput)).await;
    ExitCode::from(code)
}
