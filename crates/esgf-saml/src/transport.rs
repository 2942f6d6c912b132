//! HTTP transport for SOAP requests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};

use crate::error::{SamlResult, TransportError};

/// Content type of SOAP 1.1 requests.
pub const SOAP_CONTENT_TYPE: &str = "text/xml";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Carries one SOAP request to a service and returns the raw response body.
///
/// Implementations must not retry: one call is one HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` to `url` as `text/xml` and returns the response body.
    ///
    /// Non-success HTTP statuses are errors.
    async fn post_xml(&self, url: &str, body: String) -> SamlResult<Vec<u8>>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with the default timeout.
    pub fn new() -> SamlResult<Self> {
        Self::with_timeout(Some(DEFAULT_TIMEOUT))
    }

    /// Creates a transport with the given timeout; `None` waits forever.
    pub fn with_timeout(timeout: Option<Duration>) -> SamlResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_xml(&self, url: &str, body: String) -> SamlResult<Vec<u8>> {
        let content_length = body.len();
        tracing::debug!(
            url,
            content_type = SOAP_CONTENT_TYPE,
            content_length,
            "sending SOAP request"
        );
        tracing::debug!(body = %body, "SOAP request body");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header(CONTENT_LENGTH, content_length)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(url, status = status.as_u16(), "received SOAP response");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(url, status = status.as_u16(), "SAML service returned an error");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response.bytes().await?.to_vec())
    }
}
