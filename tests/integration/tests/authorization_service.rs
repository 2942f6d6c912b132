//! Authorization service integration tests.

use esgf_saml::{AuthorizationService, AuthzDecisionQuery, Decision, QueryParams};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{decision_response, TestEnv, AUTHORIZATION_SERVICE_PATH, OPENID};

const RESOURCE: &str = "https://data.example.org/thredds/fileServer/cmip6/tas.nc";

/// Tests a permitted authorization decision.
#[tokio::test]
async fn test_permit() -> anyhow::Result<()> {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .and(path(AUTHORIZATION_SERVICE_PATH))
        .and(header("content-type", "text/xml"))
        .and(body_string_contains("AuthzDecisionQuery"))
        .and(body_string_contains(format!(r#"Resource="{RESOURCE}""#)))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(decision_response("Permit", RESOURCE)),
        )
        .expect(1)
        .mount(&env.server)
        .await;

    let service = AuthorizationService::from_config(&env.config())?;
    let query = AuthzDecisionQuery::new(RESOURCE, OPENID, "read");
    let response = service.send(&query).await?;

    assert_eq!(response.decision()?, Decision::Permit);
    assert!(response.is_permitted()?);
    assert_eq!(response.resource(), Some(RESOURCE));
    assert_eq!(response.subject()?, OPENID);

    Ok(())
}

/// Tests a denied decision through the parameter form.
#[tokio::test]
async fn test_deny_with_params() -> anyhow::Result<()> {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .and(body_string_contains(">write</saml:Action>"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(decision_response("Deny", RESOURCE)),
        )
        .expect(1)
        .mount(&env.server)
        .await;

    let service = AuthorizationService::from_config(&env.config())?;
    let params = QueryParams::new()
        .with("resource", RESOURCE)
        .with("subject", OPENID)
        .with("action", "write");
    let response = service.send_params(&params).await?;

    assert_eq!(response.decision()?, Decision::Deny);
    assert!(!response.is_permitted()?);

    Ok(())
}
