//! Subdomain enumeration with ordered credential fallback.
//!
//! Credentials are tried in sequence; the first HTTP 200 wins and no
//! further credentials are consulted. 401, 429, any other non-200 status,
//! and transport faults all mean "try the next credential". When no
//! credential works the enumerator degrades to a baseline subdomain set
//! with an attached error message; enumeration failure never aborts a scan.

use perimeter_core::{ApexDomain, EnumerationConfig, Subdomain, SubdomainTag};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Error message when the credential list is empty.
const NO_KEYS_ERROR: &str = "No enumeration API keys provided";
/// Error message when every credential failed.
const ALL_KEYS_FAILED_ERROR: &str =
    "All subdomain enumeration API keys failed. Please check your API keys and try again.";

/// Subdomains grouped by classification tag. A subdomain may appear in
/// several groups, or none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedGroups {
    pub secure: Vec<String>,
    pub access: Vec<String>,
    pub remote: Vec<String>,
    pub api: Vec<String>,
    pub vpn: Vec<String>,
}

impl ClassifiedGroups {
    /// Group a classified subdomain list by tag.
    #[must_use]
    pub fn from_subdomains(subdomains: &[Subdomain]) -> Self {
        let mut groups = Self::default();
        for subdomain in subdomains {
            for tag in subdomain.tags() {
                let bucket = match tag {
                    SubdomainTag::Secure => &mut groups.secure,
                    SubdomainTag::Access => &mut groups.access,
                    SubdomainTag::Remote => &mut groups.remote,
                    SubdomainTag::Api => &mut groups.api,
                    SubdomainTag::Vpn => &mut groups.vpn,
                };
                bucket.push(subdomain.name().to_string());
            }
        }
        groups
    }
}

/// What one enumeration attempt produced.
#[derive(Debug, Clone)]
pub struct EnumerationOutcome {
    /// Every fully-qualified subdomain, classification included
    pub subdomains: Vec<Subdomain>,
    /// The classified groups (empty when enumeration degraded)
    pub groups: ClassifiedGroups,
    /// Human-readable message when enumeration degraded
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubdomainsResponse {
    #[serde(default)]
    subdomains: Vec<String>,
}

/// Client for a SecurityTrails-style subdomain enumeration API.
pub struct SubdomainEnumerator {
    http: reqwest::Client,
    endpoint: String,
    api_keys: Vec<String>,
}

impl SubdomainEnumerator {
    /// Build an enumerator from enumeration settings.
    pub fn new(config: &EnumerationConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_keys: config.api_keys.clone(),
        })
    }

    /// Enumerate and classify the subdomains of an apex domain.
    pub async fn enumerate(&self, apex: &ApexDomain) -> EnumerationOutcome {
        if self.api_keys.is_empty() {
            warn!("no enumeration API keys provided for {apex}");
            return Self::degraded(apex, NO_KEYS_ERROR);
        }

        let url = format!(
            "{}/domain/{}/subdomains?children_only=false",
            self.endpoint, apex
        );

        for (i, api_key) in self.api_keys.iter().enumerate() {
            info!("trying enumeration API key {}/{}", i + 1, self.api_keys.len());

            let response = match self
                .http
                .get(&url)
                .header("accept", "application/json")
                .header("apikey", api_key)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!("enumeration request with key {} failed: {e}", i + 1);
                    continue;
                }
            };

            match response.status().as_u16() {
                200 => match response.json::<SubdomainsResponse>().await {
                    Ok(body) => {
                        let subdomains: Vec<Subdomain> = body
                            .subdomains
                            .iter()
                            .map(|label| Subdomain::classify(label, apex))
                            .collect();
                        let groups = ClassifiedGroups::from_subdomains(&subdomains);

                        info!("found {} subdomains for {apex}", subdomains.len());
                        return EnumerationOutcome {
                            subdomains,
                            groups,
                            error: None,
                        };
                    }
                    Err(e) => {
                        warn!("enumeration response with key {} unparseable: {e}", i + 1);
                        continue;
                    }
                },
                401 => {
                    warn!("API key {} unauthorized, trying next key if available", i + 1);
                }
                429 => {
                    warn!("API key {} rate limit exceeded, trying next key if available", i + 1);
                }
                status => {
                    warn!("API key {} returned status code {status}", i + 1);
                }
            }
        }

        warn!("all enumeration API keys failed for {apex}");
        Self::degraded(apex, ALL_KEYS_FAILED_ERROR)
    }

    /// The graceful-degradation outcome: baseline subdomains for the apex
    /// itself, no classified groups, and an attached error message.
    fn degraded(apex: &ApexDomain, message: &str) -> EnumerationOutcome {
        let subdomains = vec![
            Subdomain::untagged(apex.as_str()),
            Subdomain::untagged(format!("www.{apex}")),
            Subdomain::untagged(format!("mail.{apex}")),
        ];

        EnumerationOutcome {
            subdomains,
            groups: ClassifiedGroups::default(),
            error: Some(message.to_string()),
        }
    }
}
