//! SAML client error types.
//!
//! Provides error types for building queries, talking to the remote
//! service and parsing its responses.

use thiserror::Error;

use crate::types::{status_codes, sub_status_codes};

/// Result type for SAML client operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// SAML client errors.
#[derive(Debug, Error)]
pub enum SamlError {
    /// A field required by the query was absent or empty.
    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    /// The HTTP exchange with the service failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response was not well-formed XML or lacked an expected element.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The service does not know the requested subject.
    #[error("unknown principal")]
    UnknownPrincipal,

    /// Writing the request envelope failed.
    #[error("XML write error: {0}")]
    XmlWrite(String),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SamlError {
    /// Returns the SAML status code URI that best describes this error.
    ///
    /// Useful when a caller needs to report a failure in SAML terms.
    #[must_use]
    pub const fn status_code(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) | Self::XmlWrite(_) | Self::Config(_) => status_codes::REQUESTER,
            Self::UnknownPrincipal => sub_status_codes::UNKNOWN_PRINCIPAL,
            Self::Transport(_) | Self::MalformedResponse(_) => status_codes::RESPONDER,
        }
    }

    /// Returns true if the error came from the HTTP layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// HTTP transport failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout or protocol failure reported by the HTTP client.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },
}

impl TransportError {
    /// Returns the HTTP status code if the service answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
        }
    }
}

impl From<reqwest::Error> for SamlError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::Request(err))
    }
}

impl From<quick_xml::Error> for SamlError {
    fn from(err: quick_xml::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for SamlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<toml::de::Error> for SamlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
