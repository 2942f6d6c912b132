//! SAML 2.0 attribute and authorization query client for ESGF services.
//!
//! This crate builds SOAP-wrapped SAML queries, posts them to a service
//! endpoint and reads the answer:
//!
//! - **AttributeQuery** - Ask an attribute service for attributes of an OpenID subject
//! - **AuthzDecisionQuery** - Ask an authorization service whether a subject may act on a resource
//! - **Response parsing** - Namespace-aware extraction of subject, status, attributes and decision
//!
//! # Architecture
//!
//! - [`types`] - Queries, parameters, attribute maps and SAML constants
//! - [`request`] - SOAP request serialization
//! - [`response`] - SAML response parsing
//! - [`transport`] - HTTP transport and its test seam
//! - [`service`] - Attribute and authorization service clients
//! - [`config`] - TOML client configuration
//! - [`error`] - Error types for SAML operations
//!
//! # Example
//!
//! ```rust,ignore
//! use esgf_saml::{AttributeQuery, AttributeService};
//!
//! let service = AttributeService::new(
//!     "https://idp.example.org/esgf-idp/saml/soap/secure/attributeService.htm",
//!     esgf_saml::DEFAULT_ISSUER,
//! )?;
//! let query = AttributeQuery::new("https://idp.example.org/esgf-idp/openid/jdoe")
//!     .with_attributes(["urn:esg:first:name", "urn:esg:email:address"]);
//!
//! let response = service.send(&query).await?;
//! for (name, value) in response.attributes()?.iter() {
//!     println!("{name}: {:?}", value.as_slice());
//! }
//! ```
//!
//! # SAML Specifications
//!
//! - [SAML 2.0 Core](https://docs.oasis-open.org/security/saml/v2.0/saml-core-2.0-os.pdf)
//! - [SAML 2.0 Bindings](https://docs.oasis-open.org/security/saml/v2.0/saml-bindings-2.0-os.pdf)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod service;
pub mod transport;
pub mod types;
pub mod xml;

pub use config::ClientConfig;
pub use error::{SamlError, SamlResult, TransportError};
pub use request::RequestBuilder;
pub use response::{AttributeResponse, AuthzDecisionResponse, SamlResponse};
pub use service::{AttributeService, AuthorizationService, ServiceClient};
pub use transport::{HttpTransport, Transport};
pub use types::*;
