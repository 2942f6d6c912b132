//! Attribute query command.

use esgf_saml::{AttributeQuery, AttributeService, ClientConfig};

use crate::cli::AttributesArgs;
use crate::config::OutputFormat;
use crate::output::{render_attributes, AttributesReport};

use super::warn_on_failure;

/// Runs the `attributes` command.
pub async fn run_attributes(
    args: AttributesArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let mut config = config.clone();
    if let Some(url) = args.url.clone() {
        config.attribute_service_url = Some(url);
    }
    let service = AttributeService::from_config(&config)?;

    let report = query_attributes(&service, args).await?;
    print!("{}", render_attributes(&report, format)?);
    Ok(())
}

/// Sends the query and collects the answer.
pub async fn query_attributes(
    service: &AttributeService,
    args: AttributesArgs,
) -> crate::CliResult<AttributesReport> {
    let query = AttributeQuery::new(args.openid).with_attributes(args.attributes);
    tracing::info!(
        url = service.client().url(),
        subject = %query.openid,
        count = query.attributes.len(),
        "querying attribute service"
    );

    let response = service.send(&query).await?;
    warn_on_failure(response.response());

    Ok(AttributesReport {
        subject: response.response().subject_opt().map(str::to_string),
        status: response.status()?,
        attributes: response.attributes()?,
    })
}
