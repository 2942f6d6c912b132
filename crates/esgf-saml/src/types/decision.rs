//! Authorization decisions.

use serde::{Deserialize, Serialize};

/// Outcome of an authorization-decision query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// The action is permitted.
    Permit,
    /// The action is denied.
    Deny,
    /// The service could not decide.
    Indeterminate,
}

impl Decision {
    /// Returns the `Decision` attribute value for this outcome.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Permit => "Permit",
            Self::Deny => "Deny",
            Self::Indeterminate => "Indeterminate",
        }
    }

    /// Parses a `Decision` attribute value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Permit" => Some(Self::Permit),
            "Deny" => Some(Self::Deny),
            "Indeterminate" => Some(Self::Indeterminate),
            _ => None,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
