//! Resolver wrapper with absorb-and-continue fault policy.

use crate::error::{DnsError, Result};
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use perimeter_core::{ApexDomain, DnsConfig};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// One MX entry: `(priority, exchange)` with the trailing dot stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxRecord {
    pub priority: u16,
    pub exchange: String,
}

/// One NS entry with the trailing dot stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NsRecord {
    pub nameserver: String,
}

/// The MX and NS record sets for an apex domain. Empty vectors are valid
/// outcomes (no record found is not an error).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordSet {
    pub mx: Vec<MxRecord>,
    pub ns: Vec<NsRecord>,
}

/// A subdomain's resolved address; `ip` is absent when resolution failed
/// or timed out, which is not an error for the overall scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub subdomain: String,
    pub ip: Option<IpAddr>,
}

/// Seam over DNS so the orchestrator can be exercised without a network.
///
/// Implementations absorb per-query faults: record lookups yield empty
/// sets and address lookups yield an absent IP, both logged.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// Fetch the MX and NS record sets for an apex domain. A fault on one
    /// record type yields an empty set for that type only; the other query
    /// proceeds independently.
    async fn lookup_records(&self, apex: &ApexDomain) -> DnsRecordSet;

    /// Resolve a single subdomain to its first A record.
    async fn resolve_address(&self, fqdn: &str) -> ResolvedAddress;
}

/// DNS client over the system-default resolver configuration with
/// explicit per-query timeouts.
pub struct DnsClient {
    resolver: TokioAsyncResolver,
}

impl DnsClient {
    /// Create a client with the given timeout and attempt settings.
    #[must_use]
    pub fn new(config: &DnsConfig) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_secs(config.timeout_secs);
        opts.attempts = config.attempts;

        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
        }
    }

    async fn mx_records(&self, apex: &str) -> Result<Vec<MxRecord>> {
        let lookup = self
            .resolver
            .mx_lookup(apex)
            .await
            .map_err(|e| DnsError::from_resolve(apex, e))?;

        Ok(lookup
            .iter()
            .map(|mx| MxRecord {
                priority: mx.preference(),
                exchange: mx.exchange().to_utf8().trim_end_matches('.').to_string(),
            })
            .collect())
    }

    async fn ns_records(&self, apex: &str) -> Result<Vec<NsRecord>> {
        let lookup = self
            .resolver
            .ns_lookup(apex)
            .await
            .map_err(|e| DnsError::from_resolve(apex, e))?;

        Ok(lookup
            .iter()
            .map(|ns| NsRecord {
                nameserver: ns.0.to_utf8().trim_end_matches('.').to_string(),
            })
            .collect())
    }

    async fn first_a(&self, fqdn: &str) -> Result<Option<IpAddr>> {
        let lookup = self
            .resolver
            .ipv4_lookup(fqdn)
            .await
            .map_err(|e| DnsError::from_resolve(fqdn, e))?;

        Ok(lookup.iter().next().map(|a| IpAddr::V4(a.0)))
    }
}

#[async_trait]
impl DnsLookup for DnsClient {
    async fn lookup_records(&self, apex: &ApexDomain) -> DnsRecordSet {
        let mx = match self.mx_records(apex.as_str()).await {
            Ok(records) => records,
            Err(e) if e.is_no_records() => {
                debug!("no MX records for {apex}");
                Vec::new()
            }
            Err(e) => {
                warn!("MX lookup failed for {apex}: {e}");
                Vec::new()
            }
        };

        let ns = match self.ns_records(apex.as_str()).await {
            Ok(records) => records,
            Err(e) if e.is_no_records() => {
                debug!("no NS records for {apex}");
                Vec::new()
            }
            Err(e) => {
                warn!("NS lookup failed for {apex}: {e}");
                Vec::new()
            }
        };

        DnsRecordSet { mx, ns }
    }

    async fn resolve_address(&self, fqdn: &str) -> ResolvedAddress {
        let ip = match self.first_a(fqdn).await {
            Ok(ip) => ip,
            Err(e) if e.is_no_records() => {
                debug!("no A record for {fqdn}");
                None
            }
            Err(e) => {
                warn!("A lookup failed for {fqdn}: {e}");
                None
            }
        };

        ResolvedAddress {
            subdomain: fqdn.to_string(),
            ip,
        }
    }
}
