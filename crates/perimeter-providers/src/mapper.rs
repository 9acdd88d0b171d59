//! First-match-wins provider mapping over the curated tables.

use crate::tables::{
    DNS_HOSTNAME_KEYWORDS, DNS_PROVIDER_ORGS, EMAIL_PROVIDER_KEYWORDS, HOSTING_PROVIDER_KEYWORDS,
};
use crate::CUSTOM_EMAIL_SERVER;
use std::collections::BTreeSet;
use tracing::debug;

/// Map one nameserver string to a DNS hosting provider.
///
/// Checks the ASN/organization table against the uppercased text, then the
/// hostname keyword table against the lowercased text, and finally falls
/// back to the nameserver's first whitespace-delimited token.
#[must_use]
pub fn dns_provider_for(nameserver: &str) -> String {
    let upper = nameserver.to_uppercase();
    for (pattern, provider) in DNS_PROVIDER_ORGS {
        if upper.contains(pattern) {
            return (*provider).to_string();
        }
    }

    let lower = nameserver.to_lowercase();
    for (keyword, provider) in DNS_HOSTNAME_KEYWORDS {
        if lower.contains(keyword) {
            return (*provider).to_string();
        }
    }

    debug!("no DNS provider match for '{nameserver}', using first token");
    nameserver
        .split_whitespace()
        .next()
        .unwrap_or(nameserver)
        .to_string()
}

/// Map one MX exchange string to an email hosting provider.
///
/// Unmatched exchanges are labeled [`CUSTOM_EMAIL_SERVER`].
#[must_use]
pub fn email_provider_for(exchange: &str) -> String {
    let lower = exchange.to_lowercase();
    for (keyword, provider) in EMAIL_PROVIDER_KEYWORDS {
        if lower.contains(keyword) {
            return (*provider).to_string();
        }
    }
    CUSTOM_EMAIL_SERVER.to_string()
}

/// Scan free-form registry text for a well-known hosting provider.
#[must_use]
pub fn hosting_provider_in(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    HOSTING_PROVIDER_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, provider)| *provider)
}

/// Accumulate the unique DNS providers behind a set of nameservers.
pub fn map_dns_providers<'a, I>(nameservers: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    nameservers
        .into_iter()
        .map(dns_provider_for)
        .collect()
}

/// Accumulate the unique email providers behind a set of MX exchanges.
pub fn map_email_providers<'a, I>(exchanges: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    exchanges.into_iter().map(email_provider_for).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_provider_from_org_table() {
        assert_eq!(dns_provider_for("CLOUDFLARENET - ns3.cloudflare.com"), "Cloudflare");
        assert_eq!(dns_provider_for("AMAZON-02 nameservers"), "Route53");
    }

    #[test]
    fn test_dns_provider_from_hostname_keywords() {
        assert_eq!(dns_provider_for("ns-1024.awsdns-10.org"), "Amazon Route53");
        assert_eq!(dns_provider_for("pdns1.domaincontrol.com"), "GoDaddy");
        assert_eq!(dns_provider_for("dns1.p01.nsone.net"), "NS1");
    }

    #[test]
    fn test_dns_provider_org_table_wins_over_keywords() {
        // "GOOGLE" in the org table fires before the lowercased keyword pass
        assert_eq!(dns_provider_for("GOOGLE ns1.googledomains.com"), "Google");
    }

    #[test]
    fn test_dns_provider_first_token_fallback() {
        assert_eq!(
            dns_provider_for("a.iana-servers.net some trailing text"),
            "a.iana-servers.net"
        );
        assert_eq!(dns_provider_for("ns7.tailored.host"), "ns7.tailored.host");
    }

    #[test]
    fn test_email_provider_known() {
        assert_eq!(email_provider_for("aspmx.l.google.com"), "Google Workspace");
        assert_eq!(
            email_provider_for("example-com.mail.protection.outlook.com"),
            "Microsoft 365"
        );
        assert_eq!(email_provider_for("mx1.emailsrvr.com"), "Rackspace Email");
    }

    #[test]
    fn test_email_provider_custom_fallback() {
        assert_eq!(email_provider_for("mail.selfhosted.example"), CUSTOM_EMAIL_SERVER);
    }

    #[test]
    fn test_hosting_provider_in_text() {
        assert_eq!(hosting_provider_in("Hosted on Amazon Web Services"), Some("Amazon AWS"));
        assert_eq!(hosting_provider_in("HETZNER Online GmbH"), Some("Hetzner"));
        assert_eq!(hosting_provider_in("Totally Independent Colo"), None);
    }

    #[test]
    fn test_map_dns_providers_dedupes() {
        let providers = map_dns_providers(
            ["ns3.cloudflare.com", "ns4.cloudflare.com", "dns1.p01.nsone.net"]
                .into_iter(),
        );
        assert_eq!(providers.len(), 2);
        assert!(providers.contains("Cloudflare"));
        assert!(providers.contains("NS1"));
    }

    #[test]
    fn test_map_email_providers_dedupes() {
        let providers = map_email_providers(
            ["alt1.aspmx.l.google.com", "alt2.aspmx.l.google.com"].into_iter(),
        );
        assert_eq!(providers.len(), 1);
        assert!(providers.contains("Google Workspace"));
    }
}
