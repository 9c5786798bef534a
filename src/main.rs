//! healthz: deployment-gating endpoint health checks.
//!
//! This is the binary entry point. It parses the CLI, initializes tracing,
//! dispatches to the single or loop command, and maps the result to the
//! process exit code. Exit codes are decided only here: 0 for healthy, 1
//! for a failed check, 130 when interrupted by a signal.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use healthz::cli::{Cli, Command};
use healthz::{probe, wait_until_healthy, Backoff, ProbeError};

/// Default log filter when neither --log-level nor RUST_LOG is set
const DEFAULT_LOG_FILTER: &str = "healthz=info";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = tokio::select! {
        result = run(cli.command) => result,
        _ = shutdown_signal() => {
            tracing::info!("Interrupted, giving up");
            return ExitCode::from(130);
        }
    };

    match result {
        Ok(()) => {
            println!("OK");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), ProbeError> {
    match command {
        Command::Single(args) => probe(&args.endpoint, args.timeout).await,
        Command::Loop(args) => {
            let backoff = Backoff::new(args.min, args.max, args.backoff);
            wait_until_healthy(&args.probe.endpoint, args.probe.timeout, backoff, args.max_attempts)
                .await
        }
    }
}

/// Resolves when SIGINT (Ctrl+C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM");
        }
    }
}
