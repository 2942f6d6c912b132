//! SAML Status types.
//!
//! Status information returned in SAML protocol responses.

use serde::{Deserialize, Serialize};

use super::{status_codes, sub_status_codes};

/// SAML protocol status as reported by a query service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// The status code.
    pub status_code: StatusCode,

    /// Optional status message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl Status {
    /// Creates a status from a code without a message.
    #[must_use]
    pub const fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            status_message: None,
        }
    }

    /// Returns true if this status indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    /// Sets the status message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }
}

/// SAML status code.
///
/// Status codes can be nested, with a top-level code and optional sub-code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCode {
    /// The status code URI value.
    pub value: String,

    /// Optional nested status code providing more detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<Box<StatusCode>>,
}

impl StatusCode {
    /// Creates a new status code with the given value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            status_code: None,
        }
    }

    /// Creates a success status code.
    #[must_use]
    pub fn success() -> Self {
        Self::new(status_codes::SUCCESS)
    }

    /// Adds a sub-status code.
    #[must_use]
    pub fn with_sub_status(mut self, sub: StatusCode) -> Self {
        self.status_code = Some(Box::new(sub));
        self
    }

    /// Returns true if this is a success status code.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.value == status_codes::SUCCESS
    }

    /// Returns the sub-status code value if present.
    #[must_use]
    pub fn sub_status_value(&self) -> Option<&str> {
        self.status_code.as_ref().map(|s| s.value.as_str())
    }

    /// Returns true if `value` appears at any nesting level.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.value == value
            || self
                .status_code
                .as_ref()
                .is_some_and(|sub| sub.contains(value))
    }

    /// Returns true if the service reported an unknown principal.
    ///
    /// Services put `UnknownPrincipal` either at the top level or nested
    /// under `Requester`/`Responder`.
    #[must_use]
    pub fn is_unknown_principal(&self) -> bool {
        self.contains(sub_status_codes::UNKNOWN_PRINCIPAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_success() {
        let status = Status::new(StatusCode::success());
        assert!(status.is_success());
        assert!(status.status_message.is_none());
    }

    #[test]
    fn status_with_message() {
        let status = Status::new(StatusCode::new(status_codes::REQUESTER))
            .with_message("No such user");
        assert!(!status.is_success());
        assert_eq!(status.status_message.as_deref(), Some("No such user"));
    }

    #[test]
    fn status_code_with_sub() {
        let code = StatusCode::new(status_codes::RESPONDER)
            .with_sub_status(StatusCode::new(sub_status_codes::UNKNOWN_PRINCIPAL));
        assert!(!code.is_success());
        assert_eq!(
            code.sub_status_value(),
            Some("urn:oasis:names:tc:SAML:2.0:status:UnknownPrincipal")
        );
        assert!(code.is_unknown_principal());
    }

    #[test]
    fn unknown_principal_at_top_level() {
        assert!(StatusCode::new(sub_status_codes::UNKNOWN_PRINCIPAL).is_unknown_principal());
        assert!(!StatusCode::success().is_unknown_principal());
    }
}
