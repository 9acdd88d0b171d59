//! Scan-side progress recording.
//!
//! The recorder owns the in-flight [`ScanProgress`] record and its update
//! cadence: counters move on every lookup, but the record is persisted on
//! the first iteration, every 5th iteration, the final iteration, and once
//! more at completion. Progress persistence failures are logged and never
//! fail the scan.

use crate::store::{ProgressStore, ScanProgress};
use tracing::{info, warn};

/// Persist the record every this-many iterations (and on the last one).
const FLUSH_EVERY: usize = 5;

/// Tracks and persists one scan's progress.
pub struct ProgressRecorder {
    store: ProgressStore,
    progress: ScanProgress,
    last_company: Option<String>,
}

impl ProgressRecorder {
    /// Start recording: writes the initial record (`percent = 0`).
    pub async fn begin(store: ProgressStore, domain: &str, total: usize) -> Self {
        let progress = ScanProgress::start(domain, total);
        if let Err(e) = store.write(&progress).await {
            warn!("could not save initial progress for {domain}: {e}");
        }

        Self {
            store,
            progress,
            last_company: None,
        }
    }

    /// Record one completed lookup.
    ///
    /// `company` is the organization attributed this iteration, if any;
    /// `companies_found` is the running distinct-organization count.
    pub async fn advance(
        &mut self,
        last_domain: &str,
        company: Option<&str>,
        companies_found: usize,
    ) {
        let total = self.progress.total;
        if total == 0 {
            return;
        }
        if self.progress.current < total {
            self.progress.current += 1;
        }
        let current = self.progress.current;

        #[allow(clippy::cast_precision_loss)]
        let percent = (current as f64 / total as f64 * 1000.0).round() / 10.0;
        // percent is monotonic over the life of one scan
        if percent > self.progress.percent {
            self.progress.percent = percent;
        }

        self.progress.last_domain = last_domain.to_string();
        self.progress.companies_found = companies_found;
        if let Some(company) = company {
            self.last_company = Some(company.to_string());
        }

        self.progress.status = match &self.last_company {
            Some(found) => format!(
                "Resolving {current}/{total} ({}%) - Found {found}",
                self.progress.percent
            ),
            None => format!("Resolving {current}/{total} ({}%)", self.progress.percent),
        };

        if (current - 1) % FLUSH_EVERY == 0 || current == total {
            info!("{}", self.progress.status);
            if let Err(e) = self.store.write(&self.progress).await {
                warn!("could not save progress for {}: {e}", self.progress.domain);
            }
        }
    }

    /// Mark the scan complete: `percent` is set to exactly 100, the record
    /// is stamped and persisted one final time.
    pub async fn complete(&mut self) {
        let total = self.progress.total;
        self.progress.status = format!(
            "Completed resolving {total} subdomains. Found {} companies.",
            self.progress.companies_found
        );
        self.progress.percent = 100.0;
        self.progress.completed = true;
        self.progress.timestamp = Some(chrono::Utc::now().timestamp());

        info!("{}", self.progress.status);
        if let Err(e) = self.store.write(&self.progress).await {
            warn!("could not save final progress for {}: {e}", self.progress.domain);
        }
    }

    /// The current in-memory record.
    #[must_use]
    pub fn snapshot(&self) -> &ScanProgress {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ExpiryPolicy;
    use tempfile::TempDir;

    async fn recorder(tmp: &TempDir, domain: &str, total: usize) -> ProgressRecorder {
        let store = ProgressStore::open(tmp.path(), ExpiryPolicy::default()).expect("open store");
        ProgressRecorder::begin(store, domain, total).await
    }

    #[tokio::test]
    async fn test_percent_monotonic_and_completes_at_100() {
        let tmp = TempDir::new().expect("create temp dir");
        let mut recorder = recorder(&tmp, "example.com", 17).await;

        let mut observed = vec![recorder.snapshot().percent];
        for i in 0..17 {
            let company = (i % 3 == 0).then_some("ACME-NET");
            recorder.advance(&format!("sub{i}.example.com"), company, 1).await;
            observed.push(recorder.snapshot().percent);
        }
        recorder.complete().await;
        observed.push(recorder.snapshot().percent);

        for window in observed.windows(2) {
            assert!(window[1] >= window[0], "percent must be non-decreasing: {observed:?}");
        }
        assert_eq!(recorder.snapshot().percent, 100.0);
        assert!(recorder.snapshot().completed);
        assert!(recorder.snapshot().timestamp.is_some());
    }

    #[tokio::test]
    async fn test_current_never_exceeds_total() {
        let tmp = TempDir::new().expect("create temp dir");
        let mut recorder = recorder(&tmp, "example.com", 2).await;

        for _ in 0..5 {
            recorder.advance("a.example.com", None, 0).await;
        }
        assert_eq!(recorder.snapshot().current, 2);
    }

    #[tokio::test]
    async fn test_initial_record_is_persisted() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = ProgressStore::open(tmp.path(), ExpiryPolicy::default()).expect("open store");
        let _recorder = ProgressRecorder::begin(store.clone(), "example.com", 9).await;

        let read = store.read("example.com").await;
        assert_eq!(read.total, 9);
        assert_eq!(read.percent, 0.0);
        assert_eq!(read.status, "Starting DNS lookups...");
    }

    #[tokio::test]
    async fn test_persisted_on_fifth_iteration_and_final() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = ProgressStore::open(tmp.path(), ExpiryPolicy::default()).expect("open store");
        let mut recorder = ProgressRecorder::begin(store.clone(), "example.com", 7).await;

        // Iterations 2-5 do not flush; the persisted record still shows
        // the first iteration.
        for i in 0..5 {
            recorder.advance(&format!("sub{i}.example.com"), None, 0).await;
        }
        let read = store.read("example.com").await;
        assert_eq!(read.current, 1);

        // The 6th iteration flushes ((6 - 1) % 5 == 0).
        recorder.advance("sub5.example.com", None, 0).await;
        let read = store.read("example.com").await;
        assert_eq!(read.current, 6);

        // The final iteration always flushes.
        recorder.advance("sub6.example.com", None, 0).await;
        let read = store.read("example.com").await;
        assert_eq!(read.current, 7);
        assert_eq!(read.percent, 100.0);
        assert!(!read.completed);
    }

    #[tokio::test]
    async fn test_status_carries_last_company_forward() {
        let tmp = TempDir::new().expect("create temp dir");
        let mut recorder = recorder(&tmp, "example.com", 6).await;

        recorder.advance("a.example.com", Some("ACME-NET"), 1).await;
        recorder.advance("b.example.com", None, 1).await;
        assert!(recorder.snapshot().status.contains("Found ACME-NET"));
    }
}
