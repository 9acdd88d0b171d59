//! The persisted progress store: one JSON document per domain key.

use crate::error::Result;
use perimeter_core::ProgressConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Status served for a domain with no recorded progress.
const NO_PROGRESS_STATUS: &str = "No progress information available";
/// Status served when a record exists but cannot be parsed.
const UNREADABLE_STATUS: &str = "Error reading progress data";

/// Incremental state of one scan, polled by the front-end.
///
/// `percent` is non-decreasing over the life of one scan and reaches exactly
/// 100 on completion; `current` never exceeds `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanProgress {
    pub domain: String,
    pub total: usize,
    pub current: usize,
    pub percent: f64,
    pub status: String,
    pub last_domain: String,
    pub companies_found: usize,
    pub completed: bool,
    /// Completion time, seconds since the Unix epoch
    pub timestamp: Option<i64>,
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self {
            domain: String::new(),
            total: 0,
            current: 0,
            percent: 0.0,
            status: String::new(),
            last_domain: String::new(),
            companies_found: 0,
            completed: false,
            timestamp: None,
        }
    }
}

impl ScanProgress {
    /// The record written when a scan starts.
    #[must_use]
    pub fn start(domain: &str, total: usize) -> Self {
        Self {
            domain: domain.to_string(),
            total,
            status: "Starting DNS lookups...".to_string(),
            ..Self::default()
        }
    }

    /// The default response for an absent key: not an error, just nothing
    /// recorded yet.
    #[must_use]
    pub fn none_available(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            status: NO_PROGRESS_STATUS.to_string(),
            ..Self::default()
        }
    }

    /// The default response for an unreadable record.
    #[must_use]
    pub fn unreadable(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            status: UNREADABLE_STATUS.to_string(),
            ..Self::default()
        }
    }
}

/// Strip every character outside `[A-Za-z0-9._-]` so a domain can never
/// escape the store directory or inject into a key.
#[must_use]
pub fn sanitize_domain_key(domain: &str) -> String {
    domain
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// Expiry rules applied by poll reads and the periodic sweep.
#[derive(Debug, Clone, Copy)]
pub struct ExpiryPolicy {
    /// How long a completed record stays readable after its completion time
    pub completed_ttl: Duration,
    /// How long an untouched record survives
    pub stale_ttl: Duration,
    /// How long an unreadable record survives
    pub unreadable_ttl: Duration,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            completed_ttl: Duration::from_secs(60),
            stale_ttl: Duration::from_secs(1800),
            unreadable_ttl: Duration::from_secs(600),
        }
    }
}

impl ExpiryPolicy {
    /// Build the policy from progress settings.
    #[must_use]
    pub fn from_config(config: &ProgressConfig) -> Self {
        Self {
            completed_ttl: Duration::from_secs(config.completed_ttl_secs),
            stale_ttl: Duration::from_secs(config.stale_ttl_secs),
            unreadable_ttl: Duration::from_secs(config.unreadable_ttl_secs),
        }
    }

    /// Whether a completed record's completion time is past the grace period.
    #[must_use]
    pub fn completed_expired(&self, progress: &ScanProgress, now_epoch: i64) -> bool {
        progress.completed
            && progress
                .timestamp
                .is_some_and(|ts| now_epoch.saturating_sub(ts) > self.completed_ttl.as_secs() as i64)
    }

    /// Sweep decision for one record: `parsed` is `None` when the record
    /// could not be read.
    #[must_use]
    pub fn should_remove(
        &self,
        age: Duration,
        parsed: Option<&ScanProgress>,
        now_epoch: i64,
    ) -> bool {
        if age > self.stale_ttl {
            return true;
        }
        match parsed {
            Some(progress) => self.completed_expired(progress, now_epoch),
            None => age > self.unreadable_ttl,
        }
    }
}

/// Keyed durable store for scan progress records.
///
/// One writer per domain (the active scan), any number of concurrent
/// readers; writes are atomic from a reader's perspective.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    dir: PathBuf,
    policy: ExpiryPolicy,
}

impl ProgressStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>, policy: ExpiryPolicy) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, policy })
    }

    /// The store's expiry policy.
    #[must_use]
    pub fn policy(&self) -> &ExpiryPolicy {
        &self.policy
    }

    fn path_for(&self, domain: &str) -> PathBuf {
        self.dir
            .join(format!("progress_{}.json", sanitize_domain_key(domain)))
    }

    /// Atomically upsert one progress record.
    pub async fn write(&self, progress: &ScanProgress) -> Result<()> {
        let path = self.path_for(&progress.domain);
        let tmp = path.with_extension("json.tmp");

        let body = serde_json::to_vec(progress)?;
        tokio::fs::write(&tmp, &body).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read the current progress for a domain.
    ///
    /// Absent and unreadable records yield default responses rather than
    /// errors. A completed record past its grace period is served one last
    /// time and then deleted.
    pub async fn read(&self, domain: &str) -> ScanProgress {
        let path = self.path_for(domain);

        let body = match tokio::fs::read(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return ScanProgress::none_available(domain);
            }
            Err(e) => {
                warn!("could not read progress for {domain}: {e}");
                return ScanProgress::unreadable(domain);
            }
        };

        let progress: ScanProgress = match serde_json::from_slice(&body) {
            Ok(progress) => progress,
            Err(e) => {
                warn!("could not parse progress for {domain}: {e}");
                return ScanProgress::unreadable(domain);
            }
        };

        if self
            .policy
            .completed_expired(&progress, chrono::Utc::now().timestamp())
        {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!("could not remove completed progress for {domain}: {e}");
            } else {
                info!("cleaned up completed progress for {domain}");
            }
        }

        progress
    }

    /// Remove a domain's record, if present.
    pub async fn remove(&self, domain: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(domain)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// One cleanup pass over the store. Returns the number of records
    /// removed.
    pub async fn sweep(&self) -> Result<usize> {
        let now_epoch = chrono::Utc::now().timestamp();
        let mut removed = 0;

        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_progress_file(&path) {
                continue;
            }

            let age = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified.elapsed().unwrap_or_default(),
                Err(e) => {
                    warn!("could not stat {}: {e}", path.display());
                    continue;
                }
            };

            let parsed = match tokio::fs::read(&path).await {
                Ok(body) => serde_json::from_slice::<ScanProgress>(&body).ok(),
                Err(_) => None,
            };

            if self.policy.should_remove(age, parsed.as_ref(), now_epoch) {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => {
                        debug!("swept {}", path.display());
                        removed += 1;
                    }
                    Err(e) => warn!("could not sweep {}: {e}", path.display()),
                }
            }
        }

        if removed > 0 {
            info!("cleaned up {removed} old progress record(s)");
        }
        Ok(removed)
    }
}

fn is_progress_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("progress_") && n.ends_with(".json"))
}
