//! Output formatting utilities.

use colored::Colorize;
use esgf_saml::{AttributeMap, Decision};
use serde::Serialize;

use crate::config::OutputFormat;

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Result of an attribute query.
#[derive(Debug, Clone, Serialize)]
pub struct AttributesReport {
    /// Subject named in the response.
    pub subject: Option<String>,
    /// Top-level status code.
    pub status: String,
    /// Returned attributes.
    pub attributes: AttributeMap,
}

/// Result of an authorization decision query.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionReport {
    /// Subject named in the response.
    pub subject: Option<String>,
    /// Resource the decision applies to.
    pub resource: Option<String>,
    /// Top-level status code.
    pub status: String,
    /// The decision.
    pub decision: Decision,
}

/// Renders an attribute report in the given format.
pub fn render_attributes(report: &AttributesReport, format: OutputFormat) -> crate::CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let mut out = header(report.subject.as_deref(), &report.status);
            if report.attributes.is_empty() {
                out.push_str("No attributes returned.\n");
            }
            let width = report.attributes.names().map(str::len).max().unwrap_or(0);
            for (name, value) in report.attributes.iter() {
                let name = format!("{name:width$}");
                out.push_str(&format!("{}  {}\n", name.bold(), value.as_slice().join(", ")));
            }
            Ok(out)
        }
    }
}

/// Renders a decision report in the given format.
pub fn render_decision(report: &DecisionReport, format: OutputFormat) -> crate::CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let mut out = header(report.subject.as_deref(), &report.status);
            if let Some(resource) = &report.resource {
                out.push_str(&format!("Resource: {resource}\n"));
            }
            let decision = match report.decision {
                Decision::Permit => report.decision.as_str().green().bold(),
                Decision::Deny => report.decision.as_str().red().bold(),
                Decision::Indeterminate => report.decision.as_str().yellow().bold(),
            };
            out.push_str(&format!("Decision: {decision}\n"));
            Ok(out)
        }
    }
}

fn header(subject: Option<&str>, status: &str) -> String {
    let mut out = String::new();
    if let Some(subject) = subject {
        out.push_str(&format!("Subject:  {subject}\n"));
    }
    out.push_str(&format!("Status:   {status}\n"));
    out
}
