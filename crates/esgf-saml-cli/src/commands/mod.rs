//! Command implementations.

pub mod attributes;
pub mod authorize;

pub use attributes::run_attributes;
pub use authorize::run_authorize;

use esgf_saml::SamlResponse;

use crate::output::warning;

/// Warns when the service answered with a non-success status.
fn warn_on_failure(response: &SamlResponse) {
    if response.is_unknown_principal() {
        warning("the service does not know this subject");
    } else if !response.is_success() {
        let status = response.status().unwrap_or_default();
        let message = response.status_message().unwrap_or("no status message");
        warning(&format!("service returned {status}: {message}"));
    }
}
