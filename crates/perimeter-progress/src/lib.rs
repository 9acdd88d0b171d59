//! Perimeter Progress - Persisted scan progress with expiry and cleanup.
//!
//! One scan writes a progress record per domain; any number of concurrent
//! poll requests read it; the store itself deletes expired records, either
//! on a poll that observes a completed scan past its grace period or via
//! the periodic [`ProgressSweeper`] task.
//!
//! Records are stored as one JSON document per sanitized domain key and
//! every write goes through a temp-file-plus-rename so a reader never
//! observes a partially written record.

pub mod error;
pub mod recorder;
pub mod store;
pub mod sweeper;

pub use error::{ProgressError, Result};
pub use recorder::ProgressRecorder;
pub use store::{sanitize_domain_key, ExpiryPolicy, ProgressStore, ScanProgress};
pub use sweeper::ProgressSweeper;
