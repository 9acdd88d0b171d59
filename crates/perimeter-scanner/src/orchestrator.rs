//! Scan orchestration: one call runs an entire footprint scan.
//!
//! The orchestrator sequences validation, enumeration, record retrieval,
//! per-subdomain resolution with inline attribution, and provider mapping
//! into a single [`ScanResult`]. Address resolution is deliberately
//! sequential: progress accounting stays exact and latency is linear in
//! subdomain count.

use crate::enumerator::{ClassifiedGroups, SubdomainEnumerator};
use crate::error::Result;
use perimeter_core::{ApexDomain, AppConfig, PerimeterError};
use perimeter_dns::{DnsClient, DnsLookup};
use perimeter_progress::{ExpiryPolicy, ProgressRecorder, ProgressStore, ScanProgress};
use perimeter_providers::{map_dns_providers, map_email_providers};
use perimeter_whois::{Attributor, CompanyIpSummary, OrgLookup, OrganizationAttribution, RdapClient};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::info;

/// The aggregate of one completed scan. Produced once, immutable thereafter.
///
/// Partial failures (failed enumeration, unresolvable subdomains, degraded
/// attribution) are embedded as data; a `ScanResult` is always a successful
/// scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// The scanned apex domain
    pub domain: String,
    /// Unique DNS hosting providers behind the NS records
    pub dns_providers: BTreeSet<String>,
    /// Unique email hosting providers behind the MX records
    pub email_providers: BTreeSet<String>,
    /// Workload summary lines: `"<org>: <n> IP(s) found"`
    pub workload: Vec<String>,
    /// Security-relevant subdomains grouped by classification tag
    pub groups: ClassifiedGroups,
    /// Every enumerated subdomain, fully qualified
    pub all_subdomains: Vec<String>,
    /// Present when enumeration degraded to the baseline subdomain set
    pub enumeration_error: Option<String>,
}

/// Runs footprint scans and serves progress polls.
pub struct Scanner {
    dns: Arc<dyn DnsLookup>,
    attributor: Attributor,
    enumerator: SubdomainEnumerator,
    store: ProgressStore,
}

impl Scanner {
    /// Build a scanner with real DNS, RDAP, and enumeration clients from
    /// configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let progress_dir = match config.progress.dir.clone() {
            Some(dir) => dir,
            None => AppConfig::data_dir()
                .map_err(PerimeterError::from)?
                .join("progress"),
        };
        let store = ProgressStore::open(progress_dir, ExpiryPolicy::from_config(&config.progress))?;

        Ok(Self {
            dns: Arc::new(DnsClient::new(&config.dns)),
            attributor: Attributor::new(Arc::new(RdapClient::new(&config.attribution)?)),
            enumerator: SubdomainEnumerator::new(&config.enumeration)?,
            store,
        })
    }

    /// Build a scanner over explicit collaborators.
    #[must_use]
    pub fn with_components(
        dns: Arc<dyn DnsLookup>,
        org_lookup: Arc<dyn OrgLookup>,
        enumerator: SubdomainEnumerator,
        store: ProgressStore,
    ) -> Self {
        Self {
            dns,
            attributor: Attributor::new(org_lookup),
            enumerator,
            store,
        }
    }

    /// The progress store backing this scanner, for wiring a sweeper.
    #[must_use]
    pub fn progress_store(&self) -> &ProgressStore {
        &self.store
    }

    /// Run an entire scan synchronously and return the aggregate result.
    ///
    /// # Errors
    /// `ScanError::InvalidDomain` before any network access when the apex
    /// domain fails validation; `ScanError::Internal` on an unexpected
    /// orchestration fault. Recoverable faults are embedded in the result.
    pub async fn start_scan(&self, domain: &str) -> Result<ScanResult> {
        let apex = ApexDomain::new(domain)?;
        info!("starting footprint scan for {apex}");

        let enumeration = self.enumerator.enumerate(&apex).await;
        let records = self.dns.lookup_records(&apex).await;

        let total = enumeration.subdomains.len();
        info!("resolving {total} subdomains for {apex}; this may take some time");
        let mut recorder = ProgressRecorder::begin(self.store.clone(), apex.as_str(), total).await;

        let mut attributions: Vec<OrganizationAttribution> = Vec::new();
        let mut companies: HashSet<String> = HashSet::new();

        for subdomain in &enumeration.subdomains {
            let resolved = self.dns.resolve_address(subdomain.name()).await;

            let company = match resolved.ip {
                Some(ip) => {
                    let attribution = self.attributor.attribute(&ip.to_string()).await;
                    companies.insert(attribution.organization.clone());
                    let name = attribution.organization.clone();
                    attributions.push(attribution);
                    Some(name)
                }
                None => None,
            };

            recorder
                .advance(subdomain.name(), company.as_deref(), companies.len())
                .await;
        }

        recorder.complete().await;

        let summary = CompanyIpSummary::from_attributions(&attributions);
        let dns_providers =
            map_dns_providers(records.ns.iter().map(|ns| ns.nameserver.as_str()));
        let email_providers =
            map_email_providers(records.mx.iter().map(|mx| mx.exchange.as_str()));

        info!(
            "scan complete for {apex}: {} subdomains, {} organizations",
            total,
            summary.len()
        );

        Ok(ScanResult {
            domain: apex.as_str().to_string(),
            dns_providers,
            email_providers,
            workload: summary.display_lines(),
            groups: enumeration.groups,
            all_subdomains: enumeration
                .subdomains
                .iter()
                .map(|s| s.name().to_string())
                .collect(),
            enumeration_error: enumeration.error,
        })
    }

    /// Idempotent read of the persisted progress for a domain. Returns a
    /// default empty-progress record when no scan is active or recorded.
    pub async fn get_progress(&self, domain: &str) -> ScanProgress {
        self.store.read(domain).await
    }
}
