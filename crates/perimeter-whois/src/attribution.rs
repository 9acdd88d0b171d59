//! Organization attribution: the ordered fallback chain over lookup results.
//!
//! The chain takes the first non-empty answer and falls through
//! deterministically to a terminal sentinel; [`Attributor::attribute`]
//! never fails the scan.

use crate::error::LookupError;
use crate::rdap::{OrgLookup, OrgRecord};
use perimeter_providers::hosting_provider_in;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sentinel for a lookup that produced no usable organization data.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
/// Sentinel for input that is not a syntactically valid address.
pub const INVALID_IP_FORMAT: &str = "Invalid IP Format";
/// Sentinel for an unexpected lookup fault.
pub const LOOKUP_ERROR: &str = "Error in IP Lookup";

/// Remarks text is truncated to this many characters when no hosting
/// keyword matches.
const REMARKS_TRUNCATE_CHARS: usize = 50;

/// Hardcoded prefix heuristics applied when a defined lookup failure left
/// no text to match. First match wins.
const PREFIX_HEURISTICS: &[(&str, &str)] = &[
    ("13.", "Amazon AWS"),
    ("52.", "Amazon AWS"),
    ("54.", "Amazon AWS"),
    ("35.", "Google Cloud"),
    ("34.", "Google Cloud"),
    ("40.", "Microsoft Azure"),
    ("20.", "Microsoft Azure"),
    ("104.16.", "Cloudflare"),
    ("104.17.", "Cloudflare"),
];

/// An IP attributed to its owning organization. Always carries a name,
/// falling back to one of the sentinel labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationAttribution {
    /// The address as given (kept verbatim so invalid input is still keyed)
    pub ip: String,
    /// The resolved organization name or a sentinel label
    pub organization: String,
}

/// Maps resolved IPs to owning organizations.
pub struct Attributor {
    lookup: Arc<dyn OrgLookup>,
}

impl Attributor {
    /// Create an attributor over the given lookup service.
    #[must_use]
    pub fn new(lookup: Arc<dyn OrgLookup>) -> Self {
        Self { lookup }
    }

    /// Attribute one address to an organization name. Never fails: every
    /// fault degrades to a sentinel label.
    pub async fn attribute(&self, ip_text: &str) -> OrganizationAttribution {
        let organization = self.organization_for(ip_text).await;
        OrganizationAttribution {
            ip: ip_text.to_string(),
            organization,
        }
    }

    async fn organization_for(&self, ip_text: &str) -> String {
        let Ok(ip) = ip_text.parse::<IpAddr>() else {
            return INVALID_IP_FORMAT.to_string();
        };

        match self.lookup.lookup(ip).await {
            Ok(record) => organization_from_record(&record)
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            Err(err) if err.is_defined() => {
                debug!("lookup degraded for {ip}: {err}");
                organization_from_failure(ip_text, &err)
            }
            Err(err) => {
                warn!("unexpected lookup fault for {ip}: {err}");
                LOOKUP_ERROR.to_string()
            }
        }
    }
}

/// The ordered field chain over a successful lookup. Returns `None` when no
/// field yields an answer (the caller supplies the terminal sentinel).
fn organization_from_record(record: &OrgRecord) -> Option<String> {
    if let Some(name) = non_empty(record.network_name.as_deref()) {
        return Some(name);
    }

    if let Some(description) = non_empty(record.asn_description.as_deref()) {
        return Some(description);
    }

    if !record.remarks.is_empty() {
        let remarks = record.remarks.join(" ");
        if let Some(provider) = hosting_provider_in(&remarks) {
            return Some(provider.to_string());
        }
        return Some(remarks.chars().take(REMARKS_TRUNCATE_CHARS).collect());
    }

    if let Some(contact) = record.contact_names.iter().find(|name| !name.is_empty()) {
        return Some(contact.clone());
    }

    if let (Some(registry), Some(asn)) = (
        non_empty(record.asn_registry.as_deref()),
        non_empty(record.asn.as_deref()),
    ) {
        return Some(format!("{registry} ASN {asn}"));
    }

    hosting_provider_in(&record.raw).map(ToString::to_string)
}

/// Degrade a defined lookup failure: keyword-scan the failure message, then
/// fall back to the IP-prefix heuristics.
fn organization_from_failure(ip_text: &str, err: &LookupError) -> String {
    if let Some(provider) = hosting_provider_in(&err.to_string()) {
        return provider.to_string();
    }

    PREFIX_HEURISTICS
        .iter()
        .find(|(prefix, _)| ip_text.starts_with(prefix))
        .map_or_else(|| UNKNOWN_COMPANY.to_string(), |(_, name)| (*name).to_string())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Mapping from organization name to the count of distinct attributed IPs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyIpSummary {
    counts: BTreeMap<String, usize>,
}

impl CompanyIpSummary {
    /// Reduce attributions by counting distinct IPs per organization.
    pub fn from_attributions<'a, I>(attributions: I) -> Self
    where
        I: IntoIterator<Item = &'a OrganizationAttribution>,
    {
        let mut per_company: HashMap<&str, HashSet<&str>> = HashMap::new();
        for attribution in attributions {
            per_company
                .entry(attribution.organization.as_str())
                .or_default()
                .insert(attribution.ip.as_str());
        }

        Self {
            counts: per_company
                .into_iter()
                .map(|(company, ips)| (company.to_string(), ips.len()))
                .collect(),
        }
    }

    /// The counts, keyed by organization name.
    #[must_use]
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Number of distinct organizations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no organization was attributed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Format as display lines: `"<org>: <n> IP(s) found"`.
    #[must_use]
    pub fn display_lines(&self) -> Vec<String> {
        self.counts
            .iter()
            .map(|(company, count)| format!("{company}: {count} IP(s) found"))
            .collect()
    }
}
