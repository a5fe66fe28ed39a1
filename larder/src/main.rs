// larder/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use larder_core::LarderError;
use larder_core::infrastructure::error::InfrastructureError;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug larder match ... to see per-recipe details
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match commands::dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(e);
            ExitCode::FAILURE
        }
    }
}

/// Prints the error chain, plus the miette diagnostic (code + help) when the
/// root cause carries one.
fn report(err: anyhow::Error) {
    eprintln!("❌ {:#}", err);

    let diagnostic = match err.downcast::<LarderError>() {
        Ok(LarderError::Domain(e)) => miette::Report::new(e),
        Ok(LarderError::Infrastructure(e)) => miette::Report::new(e),
        Ok(_) => return,
        Err(err) => match err.downcast::<InfrastructureError>() {
            Ok(e) => miette::Report::new(e),
            Err(_) => return,
        },
    };
    eprintln!("{:?}", diagnostic);
}
