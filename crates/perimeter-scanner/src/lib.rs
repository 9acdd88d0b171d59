//! Perimeter Scanner - Footprint scan orchestration.
//!
//! This crate ties the engine together: it enumerates an apex domain's
//! subdomains (with ordered credential fallback and graceful degradation),
//! resolves and attributes each subdomain's address while recording
//! pollable progress, maps NS/MX records to their providers, and assembles
//! the aggregate [`ScanResult`].
//!
//! # Example
//!
//! ```rust,ignore
//! use perimeter_core::AppConfig;
//! use perimeter_scanner::Scanner;
//!
//! let scanner = Scanner::new(&AppConfig::load_with_env()?)?;
//! let result = scanner.start_scan("example.com").await?;
//! println!("DNS providers: {:?}", result.dns_providers);
//!
//! // Any number of concurrent pollers may watch the same scan:
//! let progress = scanner.get_progress("example.com").await;
//! println!("{}% - {}", progress.percent, progress.status);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod enumerator;
#[allow(missing_docs)]
pub mod error;
pub mod orchestrator;

// Re-export commonly used types
pub use enumerator::{ClassifiedGroups, EnumerationOutcome, SubdomainEnumerator};
pub use error::{Result, ScanError};
pub use orchestrator::{ScanResult, Scanner};
