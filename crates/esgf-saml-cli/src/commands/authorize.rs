//! Authorization decision command.

use esgf_saml::{AuthorizationService, AuthzDecisionQuery, ClientConfig};

use crate::cli::AuthorizeArgs;
use crate::config::OutputFormat;
use crate::output::{render_decision, DecisionReport};

use super::warn_on_failure;

/// Runs the `authorize` command.
pub async fn run_authorize(
    args: AuthorizeArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let mut config = config.clone();
    if let Some(url) = args.url.clone() {
        config.authorization_service_url = Some(url);
    }
    let service = AuthorizationService::from_config(&config)?;

    let report = query_decision(&service, args).await?;
    print!("{}", render_decision(&report, format)?);
    Ok(())
}

/// Sends the query and collects the answer.
pub async fn query_decision(
    service: &AuthorizationService,
    args: AuthorizeArgs,
) -> crate::CliResult<DecisionReport> {
    let query = AuthzDecisionQuery::new(args.resource, args.subject, args.action);
    tracing::info!(
        url = service.client().url(),
        resource = %query.resource,
        action = %query.action,
        "querying authorization service"
    );

    let response = service.send(&query).await?;
    warn_on_failure(response.response());

    Ok(DecisionReport {
        subject: response.response().subject_opt().map(str::to_string),
        resource: response.resource().map(str::to_string),
        status: response.status()?,
        decision: response.decision()?,
    })
}
