//! SOAP-wrapped SAML query construction.
//!
//! Queries are written with a structured XML writer, so every value placed
//! in text or attribute position is escaped.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use uuid::Uuid;

use crate::error::{SamlError, SamlResult};
use crate::types::{
    AttributeQuery, AuthzDecisionQuery, Query, QueryParams, ServiceKind,
    OPENID_NAME_ID_FORMAT, SAMLP_NS, SAML_NS, SAML_VERSION, SOAP11_NS,
    X509_SUBJECT_NAME_FORMAT, XS_STRING_NAME_FORMAT,
};

type XmlWriter = Writer<Vec<u8>>;

/// Renders query messages on behalf of one issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    issuer: String,
}

impl RequestBuilder {
    /// Creates a builder that signs requests as `issuer`.
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
        }
    }

    /// Returns the issuer written into attribute queries.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Builds a request with a fresh message ID and the current time.
    pub fn build(&self, query: &Query) -> SamlResult<String> {
        self.build_with(query, &new_message_id(), Utc::now())
    }

    /// Builds the request a service of `kind` expects from loose parameters.
    pub fn build_from_params(&self, kind: ServiceKind, params: &QueryParams) -> SamlResult<String> {
        self.build(&Query::from_params(kind, params)?)
    }

    /// Builds a request with an explicit message ID and issue instant.
    pub fn build_with(
        &self,
        query: &Query,
        message_id: &str,
        issue_instant: DateTime<Utc>,
    ) -> SamlResult<String> {
        query.validate()?;
        let issue_instant = format_issue_instant(issue_instant);

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;

        let mut envelope = BytesStart::new("soap11:Envelope");
        envelope.push_attribute(("xmlns:soap11", SOAP11_NS));
        emit(&mut writer, Event::Start(envelope))?;
        emit(&mut writer, Event::Start(BytesStart::new("soap11:Body")))?;

        match query {
            Query::Attribute(q) => {
                self.write_attribute_query(&mut writer, q, message_id, &issue_instant)?;
            }
            Query::AuthzDecision(q) => {
                write_authz_decision_query(&mut writer, q, message_id, &issue_instant)?;
            }
        }

        emit(&mut writer, Event::End(BytesEnd::new("soap11:Body")))?;
        emit(&mut writer, Event::End(BytesEnd::new("soap11:Envelope")))?;

        let body = String::from_utf8(writer.into_inner())
            .map_err(|e| SamlError::XmlWrite(e.to_string()))?;
        tracing::debug!(
            message_id,
            kind = ?query.kind(),
            "built SAML {} request",
            query.kind().query_element()
        );
        Ok(body)
    }

    fn write_attribute_query(
        &self,
        writer: &mut XmlWriter,
        query: &AttributeQuery,
        message_id: &str,
        issue_instant: &str,
    ) -> SamlResult<()> {
        let mut root = BytesStart::new("samlp:AttributeQuery");
        root.push_attribute(("xmlns:samlp", SAMLP_NS));
        root.push_attribute(("ID", message_id));
        root.push_attribute(("IssueInstant", issue_instant));
        root.push_attribute(("Version", SAML_VERSION));
        emit(writer, Event::Start(root))?;

        let mut issuer = BytesStart::new("saml:Issuer");
        issuer.push_attribute(("xmlns:saml", SAML_NS));
        issuer.push_attribute(("Format", X509_SUBJECT_NAME_FORMAT));
        write_text_element(writer, issuer, &self.issuer)?;

        write_subject(writer, &query.openid)?;

        for name in &query.attributes {
            let mut attribute = BytesStart::new("saml:Attribute");
            attribute.push_attribute(("xmlns:saml", SAML_NS));
            attribute.push_attribute(("Name", name.as_str()));
            attribute.push_attribute(("NameFormat", XS_STRING_NAME_FORMAT));
            emit(writer, Event::Empty(attribute))?;
        }

        emit(writer, Event::End(BytesEnd::new("samlp:AttributeQuery")))
    }
}

fn write_authz_decision_query(
    writer: &mut XmlWriter,
    query: &AuthzDecisionQuery,
    message_id: &str,
    issue_instant: &str,
) -> SamlResult<()> {
    let mut root = BytesStart::new("samlp:AuthzDecisionQuery");
    root.push_attribute(("xmlns:samlp", SAMLP_NS));
    root.push_attribute(("ID", message_id));
    root.push_attribute(("IssueInstant", issue_instant));
    root.push_attribute(("Resource", query.resource.as_str()));
    root.push_attribute(("Version", SAML_VERSION));
    emit(writer, Event::Start(root))?;

    write_subject(writer, &query.subject)?;

    let mut action = BytesStart::new("saml:Action");
    action.push_attribute(("xmlns:saml", SAML_NS));
    write_text_element(writer, action, &query.action)?;

    emit(writer, Event::End(BytesEnd::new("samlp:AuthzDecisionQuery")))
}

/// Writes `<saml:Subject><saml:NameID Format="urn:esg:openid">…</saml:NameID></saml:Subject>`.
fn write_subject(writer: &mut XmlWriter, openid: &str) -> SamlResult<()> {
    let mut subject = BytesStart::new("saml:Subject");
    subject.push_attribute(("xmlns:saml", SAML_NS));
    emit(writer, Event::Start(subject))?;

    let mut name_id = BytesStart::new("saml:NameID");
    name_id.push_attribute(("Format", OPENID_NAME_ID_FORMAT));
    write_text_element(writer, name_id, openid)?;

    emit(writer, Event::End(BytesEnd::new("saml:Subject")))
}

fn write_text_element(writer: &mut XmlWriter, start: BytesStart<'_>, text: &str) -> SamlResult<()> {
    let end = start.to_end().into_owned();
    emit(writer, Event::Start(start))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(end))
}

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> SamlResult<()> {
    writer
        .write_event(event)
        .map_err(|e| SamlError::XmlWrite(e.to_string()))
}

/// Generates a fresh message identifier in hyphenated UUID form.
#[must_use]
pub fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}

/// Formats an issue instant the way ESGF services expect it.
///
/// The naive UTC time is rendered with microseconds and a literal `Z`
/// appended, e.g. `2024-03-01T12:00:00.000000Z`.
#[must_use]
pub fn format_issue_instant(instant: DateTime<Utc>) -> String {
    format!("{}Z", instant.naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f"))
}
