//! Shared types used across the Perimeter engine.
//!
//! This module defines the validated domain newtypes and the subdomain
//! classification model used by the enumerator and the orchestrator.

use crate::error::PerimeterError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Names containing `api` are only tagged when none of these substrings
/// are present (`capital-info.example.com` is not an API host).
const API_FALSE_POSITIVES: &[&str] = &["capital", "rapid", "capitol"];

/// Newtype for a validated apex domain.
///
/// An apex domain is a registrable domain with no subdomain label
/// (`example.com`, not `www.example.com`). Validation happens once at
/// construction; the value is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApexDomain(String);

impl ApexDomain {
    /// Create a new `ApexDomain` from a string.
    ///
    /// # Errors
    /// Returns error if the input does not match the dot-separated label
    /// grammar with a >=2-letter top-level label, or starts with `www.`.
    pub fn new(domain: impl Into<String>) -> Result<Self, PerimeterError> {
        let domain = domain.into();
        Self::validate(&domain)?;
        Ok(Self(domain))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate an apex domain: labeled-hostname grammar, >=2 labels,
    /// not starting with the literal label `www`.
    fn validate(domain: &str) -> Result<(), PerimeterError> {
        static DOMAIN_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = DOMAIN_REGEX.get_or_init(|| {
            Regex::new(r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$")
                .expect("valid regex")
        });

        if domain.is_empty() {
            return Err(PerimeterError::Validation(
                "apex domain must not be empty".to_string(),
            ));
        }

        if domain.starts_with("www.") {
            return Err(PerimeterError::Validation(format!(
                "apex domain must not start with www: '{domain}'"
            )));
        }

        if regex.is_match(domain) {
            Ok(())
        } else {
            Err(PerimeterError::Validation(format!(
                "invalid apex domain format: '{domain}'"
            )))
        }
    }
}

impl fmt::Display for ApexDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ApexDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Security-relevant subdomain categories inferred from naming convention.
///
/// Tags are independent binary classifiers: a subdomain may carry several
/// tags at once, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdomainTag {
    /// Name contains `secure`
    Secure,
    /// Name contains `access`
    Access,
    /// Name contains `remote`
    Remote,
    /// Name contains `api` (minus known false positives)
    Api,
    /// Name contains `vpn`
    Vpn,
}

impl SubdomainTag {
    /// The substring that triggers this tag.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Secure => "secure",
            Self::Access => "access",
            Self::Remote => "remote",
            Self::Api => "api",
            Self::Vpn => "vpn",
        }
    }
}

impl fmt::Display for SubdomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A fully-qualified subdomain with its classification tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdomain {
    name: String,
    tags: Vec<SubdomainTag>,
}

impl Subdomain {
    /// Build a fully-qualified subdomain from an enumeration label and
    /// classify it by case-insensitive substring match.
    #[must_use]
    pub fn classify(label: &str, apex: &ApexDomain) -> Self {
        Self::classify_fqdn(format!("{label}.{apex}"))
    }

    /// Classify an already fully-qualified name.
    #[must_use]
    pub fn classify_fqdn(name: impl Into<String>) -> Self {
        let name = name.into();
        let lowered = name.to_lowercase();
        let mut tags = Vec::new();

        for tag in [
            SubdomainTag::Secure,
            SubdomainTag::Access,
            SubdomainTag::Remote,
            SubdomainTag::Api,
            SubdomainTag::Vpn,
        ] {
            if !lowered.contains(tag.keyword()) {
                continue;
            }
            if tag == SubdomainTag::Api
                && API_FALSE_POSITIVES.iter().any(|fp| lowered.contains(fp))
            {
                continue;
            }
            tags.push(tag);
        }

        Self { name, tags }
    }

    /// A subdomain carrying no classification tags (baseline entries).
    #[must_use]
    pub fn untagged(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
        }
    }

    /// The fully-qualified name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The classification tags, in declaration order.
    #[must_use]
    pub fn tags(&self) -> &[SubdomainTag] {
        &self.tags
    }

    /// Whether this subdomain carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: SubdomainTag) -> bool {
        self.tags.contains(&tag)
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
