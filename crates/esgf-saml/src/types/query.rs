//! SAML query types.
//!
//! The two query messages this client sends: an attribute query for a
//! subject, and an authorization-decision query for a subject, resource and
//! action.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{SamlError, SamlResult};

/// The kind of query service a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// SAML attribute service.
    Attribute,
    /// SAML authorization service.
    Authorization,
}

impl ServiceKind {
    /// Returns the name of the query element sent to this service.
    #[must_use]
    pub const fn query_element(&self) -> &'static str {
        match self {
            Self::Attribute => "AttributeQuery",
            Self::Authorization => "AuthzDecisionQuery",
        }
    }
}

/// A single named query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A scalar value.
    Text(String),
    /// A list of values.
    List(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Loosely typed query parameters, e.g. `openid`, `attributes`, `resource`.
///
/// Converted into a typed query before a request is built; missing fields
/// are reported by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    params: BTreeMap<String, ParamValue>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Sets a parameter, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(name.into(), value.into());
    }

    /// Returns a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Returns a required, non-empty scalar parameter.
    pub fn require_text(&self, name: &str) -> SamlResult<&str> {
        match self.params.get(name) {
            Some(ParamValue::Text(value)) if !value.is_empty() => Ok(value),
            _ => Err(SamlError::MissingParameter(name.to_string())),
        }
    }

    /// Returns an optional list parameter; a scalar counts as one item.
    #[must_use]
    pub fn list(&self, name: &str) -> Vec<String> {
        match self.params.get(name) {
            Some(ParamValue::List(values)) => values.clone(),
            Some(ParamValue::Text(value)) => vec![value.clone()],
            None => Vec::new(),
        }
    }
}

/// Attribute query for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeQuery {
    /// OpenID URL of the subject.
    pub openid: String,

    /// Names of the attributes to request; empty requests all.
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl AttributeQuery {
    /// Creates an attribute query for a subject.
    #[must_use]
    pub fn new(openid: impl Into<String>) -> Self {
        Self {
            openid: openid.into(),
            attributes: Vec::new(),
        }
    }

    /// Adds a requested attribute name.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    /// Adds several requested attribute names.
    #[must_use]
    pub fn with_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Builds a query from `openid` and optional `attributes` parameters.
    pub fn from_params(params: &QueryParams) -> SamlResult<Self> {
        let query = Self {
            openid: params.require_text("openid")?.to_string(),
            attributes: params.list("attributes"),
        };
        query.validate()?;
        Ok(query)
    }

    /// Checks that every required field is present.
    pub fn validate(&self) -> SamlResult<()> {
        if self.openid.is_empty() {
            return Err(SamlError::MissingParameter("openid".to_string()));
        }
        if self.attributes.iter().any(String::is_empty) {
            return Err(SamlError::MissingParameter("attributes".to_string()));
        }
        Ok(())
    }
}

/// Authorization-decision query: may `subject` perform `action` on `resource`?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzDecisionQuery {
    /// URI of the protected resource.
    pub resource: String,

    /// OpenID URL of the subject.
    pub subject: String,

    /// Action the subject wants to perform.
    pub action: String,
}

impl AuthzDecisionQuery {
    /// Creates an authorization-decision query.
    #[must_use]
    pub fn new(
        resource: impl Into<String>,
        subject: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            subject: subject.into(),
            action: action.into(),
        }
    }

    /// Builds a query from `resource`, `subject` and `action` parameters.
    pub fn from_params(params: &QueryParams) -> SamlResult<Self> {
        Ok(Self {
            resource: params.require_text("resource")?.to_string(),
            subject: params.require_text("subject")?.to_string(),
            action: params.require_text("action")?.to_string(),
        })
    }

    /// Checks that every required field is present.
    pub fn validate(&self) -> SamlResult<()> {
        for (name, value) in [
            ("resource", &self.resource),
            ("subject", &self.subject),
            ("action", &self.action),
        ] {
            if value.is_empty() {
                return Err(SamlError::MissingParameter(name.to_string()));
            }
        }
        Ok(())
    }
}

/// A query of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Attribute query.
    Attribute(AttributeQuery),
    /// Authorization-decision query.
    AuthzDecision(AuthzDecisionQuery),
}

impl Query {
    /// Builds the query a service of `kind` expects from loose parameters.
    pub fn from_params(kind: ServiceKind, params: &QueryParams) -> SamlResult<Self> {
        match kind {
            ServiceKind::Attribute => AttributeQuery::from_params(params).map(Self::Attribute),
            ServiceKind::Authorization => {
                AuthzDecisionQuery::from_params(params).map(Self::AuthzDecision)
            }
        }
    }

    /// Returns the kind of service this query is addressed to.
    #[must_use]
    pub const fn kind(&self) -> ServiceKind {
        match self {
            Self::Attribute(_) => ServiceKind::Attribute,
            Self::AuthzDecision(_) => ServiceKind::Authorization,
        }
    }

    /// Checks that every required field is present.
    pub fn validate(&self) -> SamlResult<()> {
        match self {
            Self::Attribute(query) => query.validate(),
            Self::AuthzDecision(query) => query.validate(),
        }
    }
}

impl From<AttributeQuery> for Query {
    fn from(query: AttributeQuery) -> Self {
        Self::Attribute(query)
    }
}

impl From<AuthzDecisionQuery> for Query {
    fn from(query: AuthzDecisionQuery) -> Self {
        Self::AuthzDecision(query)
    }
}
