//! Attribute service integration tests.

use std::time::Duration;

use esgf_saml::{
    AttributeQuery, AttributeService, AttributeValue, ClientConfig, QueryParams, SamlError,
    TransportError, DEFAULT_ISSUER,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{
    attribute_response, unknown_principal_response, unreachable_url, TestEnv,
    ATTRIBUTE_SERVICE_PATH, OPENID,
};

/// Tests a full attribute query against a mocked service.
#[tokio::test]
async fn test_attribute_query_round_trip() -> anyhow::Result<()> {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .and(path(ATTRIBUTE_SERVICE_PATH))
        .and(header("content-type", "text/xml"))
        .and(body_string_contains(r#"Name="email""#))
        .and(body_string_contains(r#"Name="role""#))
        .and(body_string_contains(OPENID))
        .respond_with(ResponseTemplate::new(200).set_body_string(attribute_response()))
        .expect(1)
        .mount(&env.server)
        .await;

    let service = AttributeService::from_config(&env.config())?;
    let query = AttributeQuery::new(OPENID).with_attributes(["email", "role"]);
    let response = service.send(&query).await?;

    assert_eq!(response.subject()?, OPENID);
    assert!(response.response().is_success());

    let attributes = response.attributes()?;
    assert_eq!(attributes.get("email"), Some(&AttributeValue::from("a@x.org")));
    assert_eq!(
        attributes.get("role"),
        Some(&AttributeValue::from(vec!["admin", "user"]))
    );
    assert_eq!(attributes.names().collect::<Vec<_>>(), vec!["email", "role"]);

    Ok(())
}

/// Tests that the issuer and content length reach the service.
#[tokio::test]
async fn test_request_headers_and_issuer() -> anyhow::Result<()> {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .and(body_string_contains(">my-portal</saml:Issuer>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(attribute_response()))
        .expect(1)
        .mount(&env.server)
        .await;

    let config = ClientConfig {
        issuer: "my-portal".to_string(),
        ..env.config()
    };
    let service = AttributeService::from_config(&config)?;
    service.send(&AttributeQuery::new(OPENID)).await?;

    let requests = env.server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    let content_length = request
        .headers
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    assert_eq!(content_length, Some(request.body.len()));
    assert!(String::from_utf8(request.body.clone())?.starts_with("<?xml"));

    Ok(())
}

/// Tests the dynamic parameter form of the query.
#[tokio::test]
async fn test_send_params() -> anyhow::Result<()> {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .and(body_string_contains(r#"Name="email""#))
        .respond_with(ResponseTemplate::new(200).set_body_string(attribute_response()))
        .expect(1)
        .mount(&env.server)
        .await;

    let service = AttributeService::from_config(&env.config())?;
    let params = QueryParams::new()
        .with("openid", OPENID)
        .with("attributes", vec!["email"]);
    let response = service.send_params(&params).await?;
    assert_eq!(response.attributes()?.first("email"), Some("a@x.org"));

    Ok(())
}

/// Tests that a missing openid fails before any request is made.
#[tokio::test]
async fn test_missing_openid_sends_nothing() -> anyhow::Result<()> {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&env.server)
        .await;

    let service = AttributeService::from_config(&env.config())?;
    let err = service
        .send_params(&QueryParams::new().with("attributes", vec!["email"]))
        .await
        .unwrap_err();
    assert!(matches!(err, SamlError::MissingParameter(ref name) if name == "openid"));

    Ok(())
}

/// Tests that an HTTP error is reported once and not retried.
#[tokio::test]
async fn test_server_error_is_not_retried() -> anyhow::Result<()> {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&env.server)
        .await;

    let service = AttributeService::from_config(&env.config())?;
    let err = service
        .send(&AttributeQuery::new(OPENID).with_attribute("email"))
        .await
        .unwrap_err();

    match err {
        SamlError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected transport status error, got {other:?}"),
    }

    Ok(())
}

/// Tests that a refused connection is a transport error.
#[tokio::test]
async fn test_connection_refused() -> anyhow::Result<()> {
    let service = AttributeService::new(unreachable_url()?, DEFAULT_ISSUER)?;
    let err = service
        .send(&AttributeQuery::new(OPENID))
        .await
        .unwrap_err();
    assert!(err.is_transport());

    Ok(())
}

/// Tests that a slow service trips the configured timeout.
#[tokio::test]
async fn test_timeout() -> anyhow::Result<()> {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(attribute_response())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&env.server)
        .await;

    let config = ClientConfig {
        timeout_secs: Some(1),
        ..env.config()
    };
    let service = AttributeService::from_config(&config)?;
    let err = service
        .send(&AttributeQuery::new(OPENID))
        .await
        .unwrap_err();
    assert!(err.is_transport());

    Ok(())
}

/// Tests that an unknown subject surfaces as its own error.
#[tokio::test]
async fn test_unknown_principal() -> anyhow::Result<()> {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(unknown_principal_response()))
        .mount(&env.server)
        .await;

    let service = AttributeService::from_config(&env.config())?;
    let response = service.send(&AttributeQuery::new(OPENID)).await?;

    assert!(matches!(response.subject(), Err(SamlError::UnknownPrincipal)));
    assert!(response.response().is_unknown_principal());
    assert!(response.attributes()?.is_empty());

    Ok(())
}

/// Tests that a non-XML body is a malformed response.
#[tokio::test]
async fn test_malformed_body() -> anyhow::Result<()> {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>oops"))
        .mount(&env.server)
        .await;

    let service = AttributeService::from_config(&env.config())?;
    let err = service
        .send(&AttributeQuery::new(OPENID))
        .await
        .unwrap_err();
    assert!(matches!(err, SamlError::MalformedResponse(_)));

    Ok(())
}
