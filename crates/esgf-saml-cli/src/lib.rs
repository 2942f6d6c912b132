//! # esgf-saml-cli
//!
//! Command-line client for ESGF SAML services.
//!
//! This crate provides:
//! - Attribute queries against an attribute service
//! - Authorization decision queries against an authorization service
//! - Text or JSON output of the results

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::OutputFormat;
pub use error::{CliError, CliResult};
