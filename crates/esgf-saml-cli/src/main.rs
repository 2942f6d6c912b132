//! # esgf-saml
//!
//! Command-line client for ESGF SAML services.

#![forbid(unsafe_code)]

use clap::Parser;
use esgf_saml_cli::{
    cli::{Cli, Command},
    commands::{run_attributes, run_authorize},
    config,
    output::error,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "esgf_saml=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match config::resolve(&cli) {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {e}"));
            std::process::exit(e.exit_code());
        }
    };

    let result = match cli.command {
        Command::Attributes(args) => run_attributes(args, &config, cli.output).await,
        Command::Authorize(args) => run_authorize(args, &config, cli.output).await,
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}
