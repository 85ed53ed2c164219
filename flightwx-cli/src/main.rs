//! Binary crate for the `flightwx` tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The HTTP briefing endpoint

use clap::Parser;
use flightwx_core::Config;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flightwx_core=info,flightwx_cli=info")),
        )
        .init();

    let cmd = cli::Cli::parse();
    let config = Config::load()?.with_env_overrides();
    cmd.run(config).await
}
