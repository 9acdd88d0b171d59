//! Perimeter Whois - IP-to-organization attribution.
//!
//! Resolves ownership metadata for an IP through an RDAP lookup and reduces
//! it to a single organization name through an ordered fallback chain. The
//! attributor never fails: when nothing confident is available it answers
//! with one of the sentinel labels instead.

pub mod attribution;
pub mod error;
pub mod rdap;

pub use attribution::{
    Attributor, CompanyIpSummary, OrganizationAttribution, INVALID_IP_FORMAT, LOOKUP_ERROR,
    UNKNOWN_COMPANY,
};
pub use error::{LookupError, Result};
pub use rdap::{OrgLookup, OrgRecord, RdapClient};
