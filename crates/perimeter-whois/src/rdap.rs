//! RDAP lookup client.
//!
//! Queries an RDAP bootstrap service (`{endpoint}/ip/{ip}`) and normalizes
//! the heterogeneous registry JSON into an [`OrgRecord`]. Field coverage
//! varies by registry; anything absent stays `None` and the attribution
//! chain falls through to its next step.

use crate::error::{LookupError, Result};
use async_trait::async_trait;
use perimeter_core::AttributionConfig;
use serde_json::Value;
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// Normalized view of one registry lookup.
#[derive(Debug, Clone, Default)]
pub struct OrgRecord {
    /// `network.name` — the registered network name
    pub network_name: Option<String>,
    /// Autonomous-system description, where the registry exposes one
    pub asn_description: Option<String>,
    /// Free-form network remarks
    pub remarks: Vec<String>,
    /// Contact names from named sub-objects (entities)
    pub contact_names: Vec<String>,
    /// Registry identifier (`arin`, `ripe`, ...)
    pub asn_registry: Option<String>,
    /// Origin AS number, where the registry exposes one
    pub asn: Option<String>,
    /// The raw lookup text, kept for last-resort keyword scans
    pub raw: String,
}

/// Seam over the organization lookup service.
#[async_trait]
pub trait OrgLookup: Send + Sync {
    /// Resolve ownership metadata for an IP.
    async fn lookup(&self, ip: IpAddr) -> Result<OrgRecord>;
}

/// RDAP client with bounded retries.
pub struct RdapClient {
    http: reqwest::Client,
    endpoint: String,
    retry_attempts: u32,
}

impl RdapClient {
    /// Build a client from attribution settings.
    pub fn new(config: &AttributionConfig) -> std::result::Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            retry_attempts: config.retry_attempts.max(1),
        })
    }

    async fn fetch(&self, ip: IpAddr) -> Result<Value> {
        let url = format!("{}/ip/{}", self.endpoint, ip);
        let mut last_error = None;

        for attempt in 1..=self.retry_attempts {
            debug!("RDAP lookup attempt {attempt}/{} for {ip}", self.retry_attempts);

            match self.http.get(&url).header("accept", "application/json").send().await {
                Ok(response) if response.status().is_success() => {
                    return response
                        .json::<Value>()
                        .await
                        .map_err(|e| LookupError::Unexpected(format!("bad RDAP body: {e}")));
                }
                Ok(response) => {
                    last_error = Some(LookupError::HttpLookup(format!(
                        "HTTP {} from {url}",
                        response.status()
                    )));
                }
                Err(e) => {
                    last_error = Some(LookupError::HttpLookup(e.to_string()));
                }
            }

            if attempt < self.retry_attempts {
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LookupError::HttpLookup(format!("no response from {url}"))))
    }
}

#[async_trait]
impl OrgLookup for RdapClient {
    async fn lookup(&self, ip: IpAddr) -> Result<OrgRecord> {
        if is_reserved(ip) {
            return Err(LookupError::ReservedAddress(ip.to_string()));
        }

        let body = self.fetch(ip).await?;
        let record = parse_rdap(&body);

        if record.network_name.is_none() && record.remarks.is_empty() {
            debug!("sparse RDAP record for {ip}");
        }

        Ok(record)
    }
}

/// Whether an address is outside the globally routable space.
fn is_reserved(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_broadcast()
                || v4.is_documentation()
                || v4.is_unspecified()
        }
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_unspecified(),
    }
}

/// Normalize an RDAP JSON document into an [`OrgRecord`].
fn parse_rdap(body: &Value) -> OrgRecord {
    let network_name = body
        .get("name")
        .and_then(Value::as_str)
        .map(ToString::to_string);

    let mut remarks = Vec::new();
    if let Some(entries) = body.get("remarks").and_then(Value::as_array) {
        for entry in entries {
            if let Some(lines) = entry.get("description").and_then(Value::as_array) {
                let text: Vec<&str> = lines.iter().filter_map(Value::as_str).collect();
                if !text.is_empty() {
                    remarks.push(text.join(" "));
                }
            }
        }
    }

    let mut contact_names = Vec::new();
    if let Some(entities) = body.get("entities").and_then(Value::as_array) {
        for entity in entities {
            collect_contact_names(entity, &mut contact_names);
        }
    }

    // ARIN responses carry origin AS numbers on the network object
    let asn = body
        .get("arin_originas0_originautnums")
        .and_then(Value::as_array)
        .and_then(|nums| nums.first())
        .and_then(Value::as_u64)
        .map(|n| n.to_string());

    // port43 names the authoritative whois host (whois.arin.net -> arin)
    let asn_registry = body
        .get("port43")
        .and_then(Value::as_str)
        .and_then(|host| host.split('.').nth(1))
        .map(ToString::to_string);

    OrgRecord {
        network_name,
        asn_description: None,
        remarks,
        contact_names,
        asn_registry,
        asn,
        raw: body.to_string(),
    }
}

/// Pull `fn` values out of an entity's vCard, recursing into nested entities.
fn collect_contact_names(entity: &Value, out: &mut Vec<String>) {
    if let Some(vcard) = entity
        .get("vcardArray")
        .and_then(Value::as_array)
        .and_then(|v| v.get(1))
        .and_then(Value::as_array)
    {
        for field in vcard {
            let Some(parts) = field.as_array() else { continue };
            if parts.first().and_then(Value::as_str) == Some("fn") {
                if let Some(name) = parts.get(3).and_then(Value::as_str) {
                    if !name.is_empty() {
                        out.push(name.to_string());
                    }
                }
            }
        }
    }

    if let Some(nested) = entity.get("entities").and_then(Value::as_array) {
        for inner in nested {
            collect_contact_names(inner, out);
        }
    }
}
