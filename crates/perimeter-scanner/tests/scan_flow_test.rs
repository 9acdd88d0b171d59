use async_trait::async_trait;
use perimeter_core::{ApexDomain, EnumerationConfig};
use perimeter_dns::{DnsLookup, DnsRecordSet, MxRecord, NsRecord, ResolvedAddress};
use perimeter_progress::{ExpiryPolicy, ProgressStore};
use perimeter_scanner::{ScanError, Scanner, SubdomainEnumerator};
use perimeter_whois::{LookupError, OrgLookup, OrgRecord};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FakeDns {
    records: DnsRecordSet,
    addresses: HashMap<String, IpAddr>,
}

#[async_trait]
impl DnsLookup for FakeDns {
    async fn lookup_records(&self, _apex: &ApexDomain) -> DnsRecordSet {
        self.records.clone()
    }

    async fn resolve_address(&self, fqdn: &str) -> ResolvedAddress {
        ResolvedAddress {
            subdomain: fqdn.to_string(),
            ip: self.addresses.get(fqdn).copied(),
        }
    }
}

struct FakeOrgLookup;

#[async_trait]
impl OrgLookup for FakeOrgLookup {
    async fn lookup(&self, ip: IpAddr) -> Result<OrgRecord, LookupError> {
        let network_name = if ip.to_string().starts_with("198.51") {
            "ACME-NET"
        } else {
            "Cloudflare"
        };
        Ok(OrgRecord {
            network_name: Some(network_name.to_string()),
            ..OrgRecord::default()
        })
    }
}

fn fake_dns() -> Arc<FakeDns> {
    let records = DnsRecordSet {
        mx: vec![
            MxRecord {
                priority: 1,
                exchange: "aspmx.l.google.com".to_string(),
            },
            MxRecord {
                priority: 5,
                exchange: "alt1.aspmx.l.google.com".to_string(),
            },
        ],
        ns: vec![
            NsRecord {
                nameserver: "ns1.cloudflare.com".to_string(),
            },
            NsRecord {
                nameserver: "ns2.cloudflare.com".to_string(),
            },
        ],
    };

    let mut addresses = HashMap::new();
    addresses.insert(
        "secure-api.example.com".to_string(),
        "198.51.100.1".parse().expect("valid IP"),
    );
    addresses.insert(
        "vpn.example.com".to_string(),
        "104.16.1.1".parse().expect("valid IP"),
    );
    // mail.example.com intentionally unresolvable

    Arc::new(FakeDns { records, addresses })
}

async fn mock_enumeration_server(labels: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/example.com/subdomains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subdomains": labels
        })))
        .mount(&server)
        .await;
    server
}

fn scanner_with(server_uri: &str, keys: &[&str], tmp: &TempDir) -> Scanner {
    let enumerator = SubdomainEnumerator::new(&EnumerationConfig {
        api_keys: keys.iter().map(ToString::to_string).collect(),
        endpoint: server_uri.to_string(),
        timeout_secs: 2,
    })
    .expect("build enumerator");

    let store = ProgressStore::open(tmp.path(), ExpiryPolicy::default()).expect("open store");

    Scanner::with_components(fake_dns(), Arc::new(FakeOrgLookup), enumerator, store)
}

#[tokio::test]
async fn test_full_scan_flow() {
    let tmp = TempDir::new().expect("create temp dir");
    let server = mock_enumeration_server(&["secure-api", "vpn", "mail"]).await;
    let scanner = scanner_with(&server.uri(), &["key-one"], &tmp);

    let result = scanner.start_scan("example.com").await.expect("scan succeeds");

    assert_eq!(result.domain, "example.com");
    assert_eq!(
        result.all_subdomains,
        vec![
            "secure-api.example.com",
            "vpn.example.com",
            "mail.example.com"
        ]
    );
    assert!(result.enumeration_error.is_none());

    // Classification groups
    assert_eq!(result.groups.secure, vec!["secure-api.example.com"]);
    assert_eq!(result.groups.api, vec!["secure-api.example.com"]);
    assert_eq!(result.groups.vpn, vec!["vpn.example.com"]);

    // Provider mapping
    assert!(result.dns_providers.contains("Cloudflare"));
    assert_eq!(result.dns_providers.len(), 1);
    assert!(result.email_providers.contains("Google Workspace"));
    assert_eq!(result.email_providers.len(), 1);

    // Workload attribution: one distinct IP per organization
    assert!(result.workload.contains(&"ACME-NET: 1 IP(s) found".to_string()));
    assert!(result.workload.contains(&"Cloudflare: 1 IP(s) found".to_string()));
}

#[tokio::test]
async fn test_scan_records_completed_progress() {
    let tmp = TempDir::new().expect("create temp dir");
    let server = mock_enumeration_server(&["secure-api", "vpn", "mail"]).await;
    let scanner = scanner_with(&server.uri(), &["key-one"], &tmp);

    scanner.start_scan("example.com").await.expect("scan succeeds");

    let progress = scanner.get_progress("example.com").await;
    assert!(progress.completed);
    assert_eq!(progress.percent, 100.0);
    assert_eq!(progress.total, 3);
    assert_eq!(progress.current, 3);
    assert_eq!(progress.companies_found, 2);
    assert!(progress.timestamp.is_some());
    assert!(progress.status.starts_with("Completed resolving 3 subdomains"));
}

#[tokio::test]
async fn test_scan_with_failed_enumeration_still_succeeds() {
    let tmp = TempDir::new().expect("create temp dir");
    let scanner = scanner_with("http://127.0.0.1:1", &[], &tmp);

    let result = scanner.start_scan("example.com").await.expect("scan succeeds");

    assert_eq!(
        result.all_subdomains,
        vec!["example.com", "www.example.com", "mail.example.com"]
    );
    assert!(result.enumeration_error.is_some());
    assert!(result.groups.secure.is_empty());

    // Record sets still flow through provider mapping
    assert!(result.dns_providers.contains("Cloudflare"));
}

#[tokio::test]
async fn test_invalid_domain_rejected_before_any_work() {
    let tmp = TempDir::new().expect("create temp dir");
    let scanner = scanner_with("http://127.0.0.1:1", &[], &tmp);

    for input in ["www.example.com", "not a domain", ""] {
        let err = scanner
            .start_scan(input)
            .await
            .expect_err("validation should fail");
        assert!(matches!(err, ScanError::InvalidDomain(_)), "input: {input}");
    }

    // Nothing was recorded for the rejected domains
    let progress = scanner.get_progress("www.example.com").await;
    assert_eq!(progress.percent, 0.0);
    assert!(!progress.completed);
}

#[tokio::test]
async fn test_get_progress_for_unknown_domain_is_default() {
    let tmp = TempDir::new().expect("create temp dir");
    let scanner = scanner_with("http://127.0.0.1:1", &[], &tmp);

    let progress = scanner.get_progress("never-scanned.example").await;
    assert_eq!(progress.percent, 0.0);
    assert_eq!(progress.status, "No progress information available");
}
