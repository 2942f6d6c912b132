//! Common test utilities and fixtures.

use std::net::TcpListener;

use esgf_saml::ClientConfig;
use wiremock::MockServer;

/// Path of the mocked attribute service.
pub const ATTRIBUTE_SERVICE_PATH: &str = "/esgf-idp/saml/soap/secure/attributeService.htm";

/// Path of the mocked authorization service.
pub const AUTHORIZATION_SERVICE_PATH: &str = "/esgf-orp/saml/soap/secure/authorizationService.htm";

/// OpenID used as the query subject.
pub const OPENID: &str = "https://idp.example.org/esgf-idp/openid/jdoe";

/// Test environment around a mock SAML server.
pub struct TestEnv {
    /// The mock server.
    pub server: MockServer,
}

impl TestEnv {
    /// Starts a fresh mock server.
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("esgf_saml=debug")
            .with_test_writer()
            .try_init();

        Self {
            server: MockServer::start().await,
        }
    }

    /// Client configuration pointing at the mock server.
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            attribute_service_url: Some(format!("{}{ATTRIBUTE_SERVICE_PATH}", self.server.uri())),
            authorization_service_url: Some(format!(
                "{}{AUTHORIZATION_SERVICE_PATH}",
                self.server.uri()
            )),
            ..ClientConfig::default()
        }
    }
}

/// Returns a URL on which nothing is listening.
pub fn unreachable_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{port}{ATTRIBUTE_SERVICE_PATH}"))
}

/// Wraps a SAML response element in a SOAP envelope.
pub fn soap_envelope(response: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap11:Envelope xmlns:soap11="http://schemas.xmlsoap.org/soap/envelope/">
  <soap11:Body>{response}</soap11:Body>
</soap11:Envelope>"#
    )
}

/// Successful attribute response for [`OPENID`].
pub fn attribute_response() -> String {
    soap_envelope(&format!(
        r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="r1" Version="2.0">
      <samlp:Status><samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Success"/></samlp:Status>
      <saml:Assertion ID="a1" Version="2.0">
        <saml:Subject><saml:NameID Format="urn:esg:openid">{OPENID}</saml:NameID></saml:Subject>
        <saml:AttributeStatement>
          <saml:Attribute Name="email"><saml:AttributeValue>a@x.org</saml:AttributeValue></saml:Attribute>
          <saml:Attribute Name="role"><saml:AttributeValue>admin</saml:AttributeValue></saml:Attribute>
          <saml:Attribute Name="role"><saml:AttributeValue>user</saml:AttributeValue></saml:Attribute>
        </saml:AttributeStatement>
      </saml:Assertion>
    </samlp:Response>"#
    ))
}

/// Response of a service that does not know the subject.
pub fn unknown_principal_response() -> String {
    soap_envelope(
        r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" ID="r2" Version="2.0">
      <samlp:Status>
        <samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Responder">
          <samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:UnknownPrincipal"/>
        </samlp:StatusCode>
      </samlp:Status>
    </samlp:Response>"#,
    )
}

/// Authorization decision response.
pub fn decision_response(decision: &str, resource: &str) -> String {
    soap_envelope(&format!(
        r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="r3" Version="2.0">
      <samlp:Status><samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Success"/></samlp:Status>
      <saml:Assertion ID="a3" Version="2.0">
        <saml:Subject><saml:NameID Format="urn:esg:openid">{OPENID}</saml:NameID></saml:Subject>
        <saml:AuthzDecisionStatement Decision="{decision}" Resource="{resource}">
          <saml:Action Namespace="urn:oasis:names:tc:SAML:1.0:action:rwedc">read</saml:Action>
        </saml:AuthzDecisionStatement>
      </saml:Assertion>
    </samlp:Response>"#
    ))
}
