//! SAML 2.0 constants and URIs.
//!
//! Contains the namespace table used for element lookups, name ID and
//! attribute name formats, and the status codes a query service may return.

/// SAML 2.0 assertion namespace URI.
pub const SAML_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

/// SAML 2.0 protocol namespace URI.
pub const SAMLP_NS: &str = "urn:oasis:names:tc:SAML:2.0:protocol";

/// SOAP 1.1 envelope namespace URI.
pub const SOAP11_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// XSI namespace URI.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XS namespace URI.
pub const XS_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// SAML protocol version written into every query.
pub const SAML_VERSION: &str = "2.0";

/// Issuer used when none is configured.
pub const DEFAULT_ISSUER: &str = "esgf-pyclient";

// ============================================================================
// Namespace table
// ============================================================================

/// Fixed prefix to namespace URI mapping.
///
/// `saml2p` and `samlp` are both accepted spellings of the protocol
/// namespace.
pub const NAMESPACES: &[(&str, &str)] = &[
    ("saml", SAML_NS),
    ("saml2p", SAMLP_NS),
    ("samlp", SAMLP_NS),
    ("soap11", SOAP11_NS),
    ("xs", XS_NS),
    ("xsi", XSI_NS),
];

/// Looks up the namespace URI bound to a prefix in [`NAMESPACES`].
#[must_use]
pub fn namespace_uri(prefix: &str) -> Option<&'static str> {
    NAMESPACES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
}

/// A namespace-qualified element name.
///
/// Matching is done on the namespace URI and local name only; the prefix a
/// document happens to use is irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI.
    pub namespace: &'static str,
    /// Local element name.
    pub local: &'static str,
}

impl QName {
    /// Creates a qualified name from a namespace URI and local name.
    #[must_use]
    pub const fn new(namespace: &'static str, local: &'static str) -> Self {
        Self { namespace, local }
    }

    /// Element in the SAML assertion namespace.
    #[must_use]
    pub const fn saml(local: &'static str) -> Self {
        Self::new(SAML_NS, local)
    }

    /// Element in the SAML protocol namespace.
    #[must_use]
    pub const fn samlp(local: &'static str) -> Self {
        Self::new(SAMLP_NS, local)
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

// ============================================================================
// Formats
// ============================================================================

/// Name ID format used for ESGF OpenID subjects.
pub const OPENID_NAME_ID_FORMAT: &str = "urn:esg:openid";

/// Name ID format of the request issuer.
pub const X509_SUBJECT_NAME_FORMAT: &str =
    "urn:oasis:names:tc:SAML:1.1:nameid-format:X509SubjectName";

/// Name format of requested attributes.
pub const XS_STRING_NAME_FORMAT: &str = "http://www.w3.org/2001/XMLSchema#string";

// ============================================================================
// Status Codes
// ============================================================================

/// Top-level SAML status codes.
pub mod status_codes {
    /// Success status code.
    pub const SUCCESS: &str = "urn:oasis:names:tc:SAML:2.0:status:Success";

    /// Requester error status code.
    pub const REQUESTER: &str = "urn:oasis:names:tc:SAML:2.0:status:Requester";

    /// Responder error status code.
    pub const RESPONDER: &str = "urn:oasis:names:tc:SAML:2.0:status:Responder";

    /// Version mismatch status code.
    pub const VERSION_MISMATCH: &str = "urn:oasis:names:tc:SAML:2.0:status:VersionMismatch";
}

/// Second-level SAML status codes a query service may nest.
pub mod sub_status_codes {
    /// Invalid attribute name or value.
    pub const INVALID_ATTR_NAME_OR_VALUE: &str =
        "urn:oasis:names:tc:SAML:2.0:status:InvalidAttrNameOrValue";

    /// Request denied.
    pub const REQUEST_DENIED: &str = "urn:oasis:names:tc:SAML:2.0:status:RequestDenied";

    /// Request unsupported.
    pub const REQUEST_UNSUPPORTED: &str = "urn:oasis:names:tc:SAML:2.0:status:RequestUnsupported";

    /// Resource not recognized.
    pub const RESOURCE_NOT_RECOGNIZED: &str =
        "urn:oasis:names:tc:SAML:2.0:status:ResourceNotRecognized";

    /// Unknown attribute profile.
    pub const UNKNOWN_ATTR_PROFILE: &str =
        "urn:oasis:names:tc:SAML:2.0:status:UnknownAttrProfile";

    /// Unknown principal.
    pub const UNKNOWN_PRINCIPAL: &str = "urn:oasis:names:tc:SAML:2.0:status:UnknownPrincipal";
}
