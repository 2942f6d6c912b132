//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

/// Query ESGF SAML attribute and authorization services.
#[derive(Debug, Parser)]
#[command(name = "esgf-saml")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true, env = "ESGF_SAML_CONFIG")]
    pub config: Option<PathBuf>,

    /// Issuer written into queries (overrides config).
    #[arg(long, global = true, env = "ESGF_SAML_ISSUER")]
    pub issuer: Option<String>,

    /// Request timeout in seconds, 0 for none (overrides config).
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query an attribute service for attributes of a subject.
    Attributes(AttributesArgs),

    /// Ask an authorization service for a decision.
    Authorize(AuthorizeArgs),
}

/// Arguments of the `attributes` command.
#[derive(Debug, Args)]
pub struct AttributesArgs {
    /// Attribute service URL (overrides config).
    #[arg(long)]
    pub url: Option<String>,

    /// OpenID of the subject.
    #[arg(long)]
    pub openid: String,

    /// Attribute name to request; may be repeated.
    #[arg(short, long = "attribute", value_name = "NAME")]
    pub attributes: Vec<String>,
}

/// Arguments of the `authorize` command.
#[derive(Debug, Args)]
pub struct AuthorizeArgs {
    /// Authorization service URL (overrides config).
    #[arg(long)]
    pub url: Option<String>,

    /// Resource the decision is about.
    #[arg(long)]
    pub resource: String,

    /// OpenID of the subject.
    #[arg(long)]
    pub subject: String,

    /// Requested action.
    #[arg(long, default_value = "read")]
    pub action: String,
}
