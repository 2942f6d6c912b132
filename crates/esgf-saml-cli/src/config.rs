//! CLI configuration.

use std::path::Path;

use esgf_saml::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format.
    Json,
}

/// Loads the client configuration and applies command-line overrides.
///
/// Without a configuration file the defaults are used.
pub fn resolve(cli: &Cli) -> crate::CliResult<ClientConfig> {
    let config = match cli.config.as_deref() {
        Some(path) => load(path)?,
        None => ClientConfig::default(),
    };
    Ok(apply_overrides(config, cli.issuer.as_deref(), cli.timeout))
}

fn load(path: &Path) -> crate::CliResult<ClientConfig> {
    tracing::debug!(path = %path.display(), "loading configuration");
    Ok(ClientConfig::load(path)?)
}

fn apply_overrides(
    mut config: ClientConfig,
    issuer: Option<&str>,
    timeout: Option<u64>,
) -> ClientConfig {
    if let Some(issuer) = issuer {
        config.issuer = issuer.to_string();
    }
    if let Some(timeout) = timeout {
        config.timeout_secs = Some(timeout);
    }
    config
}
