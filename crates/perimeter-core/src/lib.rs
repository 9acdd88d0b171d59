//! Perimeter Core - Foundation crate for the Perimeter reconnaissance engine.
//!
//! This crate provides the shared types, error handling, and configuration
//! management that all other Perimeter crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Validated domain newtypes and subdomain classification
//!
//! # Example
//!
//! ```rust
//! use perimeter_core::{ApexDomain, AppConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration
//! let config = AppConfig::default();
//! assert_eq!(config.dns.timeout_secs, 10);
//!
//! // Validate an apex domain before any network access
//! let domain = ApexDomain::new("example.com")?;
//! assert_eq!(domain.as_str(), "example.com");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, AttributionConfig, DnsConfig, EnumerationConfig, ProgressConfig,
};
pub use error::{ConfigError, ConfigResult, PerimeterError, Result};
pub use types::{ApexDomain, Subdomain, SubdomainTag};
