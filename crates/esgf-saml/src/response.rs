//! SAML response parsing.
//!
//! [`SamlResponse`] exposes what every query response carries: the status
//! and, on success, the subject. [`AttributeResponse`] and
//! [`AuthzDecisionResponse`] add the payload of the respective service.

use crate::error::{SamlError, SamlResult};
use crate::types::{AttributeMap, Decision, QName, Status, StatusCode};
use crate::xml::{Document, ElementRef};

const SUBJECT_NAME_ID: [QName; 2] = [QName::saml("Subject"), QName::saml("NameID")];
const STATUS_CODE: [QName; 2] = [QName::samlp("Status"), QName::samlp("StatusCode")];
const STATUS_MESSAGE: [QName; 2] = [QName::samlp("Status"), QName::samlp("StatusMessage")];
const STATEMENT_ATTRIBUTE: [QName; 2] = [
    QName::saml("AttributeStatement"),
    QName::saml("Attribute"),
];
const ATTRIBUTE_VALUE: QName = QName::saml("AttributeValue");
const AUTHZ_DECISION_STATEMENT: [QName; 1] = [QName::saml("AuthzDecisionStatement")];

/// A parsed SAML protocol response.
#[derive(Debug, Clone)]
pub struct SamlResponse {
    document: Document,
}

impl SamlResponse {
    /// Parses a response body.
    pub fn parse(body: &[u8]) -> SamlResult<Self> {
        Document::parse(body).map(Self::from_document)
    }

    /// Parses a response from a string.
    pub fn from_xml(xml: &str) -> SamlResult<Self> {
        Document::parse_str(xml).map(Self::from_document)
    }

    /// Wraps an already parsed document.
    #[must_use]
    pub const fn from_document(document: Document) -> Self {
        Self { document }
    }

    /// Returns the underlying document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the text of the first `Subject/NameID` in the response.
    ///
    /// A service that does not know the subject answers with an
    /// `UnknownPrincipal` status and no `NameID`; that case is reported as
    /// [`SamlError::UnknownPrincipal`].
    pub fn subject(&self) -> SamlResult<String> {
        if let Some(subject) = self.subject_opt() {
            return Ok(subject.to_string());
        }
        if self.is_unknown_principal() {
            return Err(SamlError::UnknownPrincipal);
        }
        Err(SamlError::MalformedResponse(
            "no Subject/NameID element".to_string(),
        ))
    }

    /// Returns the text of the first `Subject/NameID`, if any.
    #[must_use]
    pub fn subject_opt(&self) -> Option<&str> {
        self.document.find(&SUBJECT_NAME_ID).map(|el| el.text())
    }

    /// Returns the `Value` of the first `Status/StatusCode`.
    pub fn status(&self) -> SamlResult<String> {
        let code = self.status_element()?;
        code.attribute("Value").map(str::to_string).ok_or_else(|| {
            SamlError::MalformedResponse("StatusCode has no Value attribute".to_string())
        })
    }

    /// Returns the full status code, including nested sub-codes.
    pub fn status_code(&self) -> SamlResult<StatusCode> {
        parse_status_code(self.status_element()?)
    }

    /// Returns the status code together with any status message.
    pub fn full_status(&self) -> SamlResult<Status> {
        let status = Status::new(self.status_code()?);
        Ok(match self.status_message() {
            Some(message) => status.with_message(message),
            None => status,
        })
    }

    /// Returns the `StatusMessage` text, if present.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.document
            .find(&STATUS_MESSAGE)
            .map(|el| el.text())
            .filter(|text| !text.is_empty())
    }

    /// Returns true if the top-level status code is `Success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code().is_ok_and(|code| code.is_success())
    }

    /// Returns true if the status reports an unknown principal.
    #[must_use]
    pub fn is_unknown_principal(&self) -> bool {
        self.status_code()
            .is_ok_and(|code| code.is_unknown_principal())
    }

    fn status_element(&self) -> SamlResult<ElementRef<'_>> {
        self.document.find(&STATUS_CODE).ok_or_else(|| {
            SamlError::MalformedResponse("no Status/StatusCode element".to_string())
        })
    }
}

fn parse_status_code(element: ElementRef<'_>) -> SamlResult<StatusCode> {
    let value = element.attribute("Value").ok_or_else(|| {
        SamlError::MalformedResponse("StatusCode has no Value attribute".to_string())
    })?;

    let mut code = StatusCode::new(value);
    if let Some(nested) = element.child(QName::samlp("StatusCode")) {
        code = code.with_sub_status(parse_status_code(nested)?);
    }
    Ok(code)
}

/// Response of an attribute service.
#[derive(Debug, Clone)]
pub struct AttributeResponse {
    response: SamlResponse,
}

impl AttributeResponse {
    /// Parses a response body.
    pub fn parse(body: &[u8]) -> SamlResult<Self> {
        SamlResponse::parse(body).map(Self::from)
    }

    /// Parses a response from a string.
    pub fn from_xml(xml: &str) -> SamlResult<Self> {
        SamlResponse::from_xml(xml).map(Self::from)
    }

    /// Returns the generic response.
    #[must_use]
    pub const fn response(&self) -> &SamlResponse {
        &self.response
    }

    /// Returns the subject of the response.
    pub fn subject(&self) -> SamlResult<String> {
        self.response.subject()
    }

    /// Returns the top-level status code value.
    pub fn status(&self) -> SamlResult<String> {
        self.response.status()
    }

    /// Collects every `AttributeStatement/Attribute` into an attribute map.
    ///
    /// All `AttributeValue` children of an attribute are read. Values of
    /// attributes that occur more than once are merged under one name.
    pub fn attributes(&self) -> SamlResult<AttributeMap> {
        let mut occurrences = Vec::new();
        for attribute in self.response.document.find_all(&STATEMENT_ATTRIBUTE) {
            let name = attribute.attribute("Name").ok_or_else(|| {
                SamlError::MalformedResponse("Attribute has no Name".to_string())
            })?;
            let values = attribute
                .children_named(ATTRIBUTE_VALUE)
                .map(|value| value.text().to_string())
                .collect();
            occurrences.push((name.to_string(), values));
        }

        let attributes = AttributeMap::accumulate(occurrences);
        tracing::debug!(count = attributes.len(), "parsed attribute statement");
        Ok(attributes)
    }
}

impl From<SamlResponse> for AttributeResponse {
    fn from(response: SamlResponse) -> Self {
        Self { response }
    }
}

/// Response of an authorization service.
#[derive(Debug, Clone)]
pub struct AuthzDecisionResponse {
    response: SamlResponse,
}

impl AuthzDecisionResponse {
    /// Parses a response body.
    pub fn parse(body: &[u8]) -> SamlResult<Self> {
        SamlResponse::parse(body).map(Self::from)
    }

    /// Parses a response from a string.
    pub fn from_xml(xml: &str) -> SamlResult<Self> {
        SamlResponse::from_xml(xml).map(Self::from)
    }

    /// Returns the generic response.
    #[must_use]
    pub const fn response(&self) -> &SamlResponse {
        &self.response
    }

    /// Returns the subject of the response.
    pub fn subject(&self) -> SamlResult<String> {
        self.response.subject()
    }

    /// Returns the top-level status code value.
    pub fn status(&self) -> SamlResult<String> {
        self.response.status()
    }

    /// Returns the `Decision` of the first `AuthzDecisionStatement`.
    pub fn decision(&self) -> SamlResult<Decision> {
        let statement = self
            .response
            .document
            .find(&AUTHZ_DECISION_STATEMENT)
            .ok_or_else(|| {
                SamlError::MalformedResponse("no AuthzDecisionStatement element".to_string())
            })?;
        let value = statement.attribute("Decision").ok_or_else(|| {
            SamlError::MalformedResponse("AuthzDecisionStatement has no Decision".to_string())
        })?;
        Decision::parse(value)
            .ok_or_else(|| SamlError::MalformedResponse(format!("unknown decision: {value}")))
    }

    /// Returns the resource the decision applies to, if stated.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.response
            .document
            .find(&AUTHZ_DECISION_STATEMENT)
            .and_then(|el| el.attribute("Resource"))
    }

    /// Returns true if the service permitted the action.
    pub fn is_permitted(&self) -> SamlResult<bool> {
        self.decision().map(|decision| decision == Decision::Permit)
    }
}

impl From<SamlResponse> for AuthzDecisionResponse {
    fn from(response: SamlResponse) -> Self {
        Self { response }
    }
}
