use thiserror::Error;

/// Failure classes raised by an organization lookup.
///
/// The first three are the defined lookup-failure conditions (the attributor
/// degrades them to a keyword/heuristic answer); [`LookupError::Unexpected`]
/// covers everything else and maps to the `"Error in IP Lookup"` sentinel.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The address is private, reserved, or otherwise not globally routable.
    #[error("address is private or reserved: {0}")]
    ReservedAddress(String),

    /// The RDAP HTTP request failed (transport fault or non-success status).
    #[error("HTTP lookup failed: {0}")]
    HttpLookup(String),

    /// The registry answered but its response could not be used.
    #[error("ASN registry error: {0}")]
    AsnRegistry(String),

    /// Any other unexpected fault.
    #[error("unexpected lookup fault: {0}")]
    Unexpected(String),
}

impl LookupError {
    /// Whether this is one of the defined (degradable) failure classes.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defined_classes() {
        assert!(LookupError::ReservedAddress("10.0.0.1".to_string()).is_defined());
        assert!(LookupError::HttpLookup("HTTP 503".to_string()).is_defined());
        assert!(LookupError::AsnRegistry("bad registry".to_string()).is_defined());
        assert!(!LookupError::Unexpected("panic adjacent".to_string()).is_defined());
    }
}
