//! CLI error types.

use esgf_saml::SamlError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error reported by the SAML client, including configuration errors.
    #[error(transparent)]
    Saml(#[from] SamlError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Saml(SamlError::Config(_) | SamlError::MissingParameter(_)) => 2,
            _ => 1,
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
