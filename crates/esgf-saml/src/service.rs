//! Attribute and authorization service clients.
//!
//! Each service binds an endpoint URL, an issuer and a transport, and turns
//! one query into one HTTP exchange and one parsed response.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::SamlResult;
use crate::request::RequestBuilder;
use crate::response::{AttributeResponse, AuthzDecisionResponse, SamlResponse};
use crate::transport::{HttpTransport, Transport};
use crate::types::{AttributeQuery, AuthzDecisionQuery, Query, QueryParams, ServiceKind};

/// Shared request/response cycle used by both services.
#[derive(Clone)]
pub struct ServiceClient {
    url: String,
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("url", &self.url)
            .field("issuer", &self.builder.issuer())
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    /// Creates a client using the given transport.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        issuer: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            url: url.into(),
            builder: RequestBuilder::new(issuer),
            transport,
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the issuer.
    #[must_use]
    pub fn issuer(&self) -> &str {
        self.builder.issuer()
    }

    /// Builds, sends and parses one query.
    pub async fn send(&self, query: &Query) -> SamlResult<SamlResponse> {
        let body = self.builder.build(query)?;
        let response = self.transport.post_xml(&self.url, body).await?;
        tracing::debug!(url = %self.url, bytes = response.len(), "parsing SAML response");
        SamlResponse::parse(&response)
    }
}

fn http_client(url: String, config: &ClientConfig) -> SamlResult<ServiceClient> {
    let transport = HttpTransport::with_timeout(config.timeout())?;
    Ok(ServiceClient::new(url, config.issuer.clone(), Arc::new(transport)))
}

/// Client of a SAML attribute service.
#[derive(Debug, Clone)]
pub struct AttributeService {
    client: ServiceClient,
}

impl AttributeService {
    /// The kind of service this client talks to.
    pub const KIND: ServiceKind = ServiceKind::Attribute;

    /// Creates a client over HTTP with the default timeout.
    pub fn new(url: impl Into<String>, issuer: impl Into<String>) -> SamlResult<Self> {
        let transport = HttpTransport::new()?;
        Ok(Self::with_transport(url, issuer, Arc::new(transport)))
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &ClientConfig) -> SamlResult<Self> {
        let url = config.require_attribute_service_url()?.to_string();
        http_client(url, config).map(|client| Self { client })
    }

    /// Creates a client using the given transport.
    #[must_use]
    pub fn with_transport(
        url: impl Into<String>,
        issuer: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            client: ServiceClient::new(url, issuer, transport),
        }
    }

    /// Returns the shared client.
    #[must_use]
    pub const fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Queries the service for attributes of a subject.
    pub async fn send(&self, query: &AttributeQuery) -> SamlResult<AttributeResponse> {
        self.client
            .send(&Query::Attribute(query.clone()))
            .await
            .map(AttributeResponse::from)
    }

    /// Queries the service using `openid` and `attributes` parameters.
    pub async fn send_params(&self, params: &QueryParams) -> SamlResult<AttributeResponse> {
        self.send(&AttributeQuery::from_params(params)?).await
    }
}

/// Client of a SAML authorization service.
#[derive(Debug, Clone)]
pub struct AuthorizationService {
    client: ServiceClient,
}

impl AuthorizationService {
    /// The kind of service this client talks to.
    pub const KIND: ServiceKind = ServiceKind::Authorization;

    /// Creates a client over HTTP with the default timeout.
    pub fn new(url: impl Into<String>, issuer: impl Into<String>) -> SamlResult<Self> {
        let transport = HttpTransport::new()?;
        Ok(Self::with_transport(url, issuer, Arc::new(transport)))
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &ClientConfig) -> SamlResult<Self> {
        let url = config.require_authorization_service_url()?.to_string();
        http_client(url, config).map(|client| Self { client })
    }

    /// Creates a client using the given transport.
    #[must_use]
    pub fn with_transport(
        url: impl Into<String>,
        issuer: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            client: ServiceClient::new(url, issuer, transport),
        }
    }

    /// Returns the shared client.
    #[must_use]
    pub const fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Asks the service whether the subject may act on the resource.
    pub async fn send(&self, query: &AuthzDecisionQuery) -> SamlResult<AuthzDecisionResponse> {
        self.client
            .send(&Query::AuthzDecision(query.clone()))
            .await
            .map(AuthzDecisionResponse::from)
    }

    /// Queries the service using `resource`, `subject` and `action` parameters.
    pub async fn send_params(&self, params: &QueryParams) -> SamlResult<AuthzDecisionResponse> {
        self.send(&AuthzDecisionQuery::from_params(params)?).await
    }
}
