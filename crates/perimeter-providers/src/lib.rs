//! Perimeter Providers - Curated provider knowledge.
//!
//! Maps raw DNS records and lookup text to the external providers behind
//! them: NS records to DNS hosting providers, MX records to email hosting
//! providers, and free-form registry text to well-known hosting companies.
//!
//! All tables are ordered association slices and every lookup is
//! first-match-wins; the ordering is part of each table's contract.

pub mod mapper;
pub mod tables;

pub use mapper::{
    dns_provider_for, email_provider_for, hosting_provider_in, map_dns_providers,
    map_email_providers,
};
pub use tables::{
    DNS_HOSTNAME_KEYWORDS, DNS_PROVIDER_ORGS, EMAIL_PROVIDER_KEYWORDS, HOSTING_PROVIDER_KEYWORDS,
};

/// Label applied to MX exchanges that match no known email provider.
pub const CUSTOM_EMAIL_SERVER: &str = "Custom Email Server";
