//! Configuration management for Perimeter.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/perimeter/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Subdomain enumeration settings
    pub enumeration: EnumerationConfig,
    /// DNS resolution settings
    pub dns: DnsConfig,
    /// Organization attribution settings
    pub attribution: AttributionConfig,
    /// Progress store settings
    pub progress: ProgressConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `PERIMETER_API_KEYS`: Comma-separated enumeration API keys
    /// - `PERIMETER_DNS_TIMEOUT_SECS`: Override DNS lookup timeout
    /// - `PERIMETER_PROGRESS_DIR`: Override the progress store directory
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        // Override from environment
        if let Ok(val) = std::env::var("PERIMETER_API_KEYS") {
            let keys: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ToString::to_string)
                .collect();
            tracing::debug!("Override api_keys from env: {} key(s)", keys.len());
            config.enumeration.api_keys = keys;
        }

        if let Ok(val) = std::env::var("PERIMETER_DNS_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.dns.timeout_secs = secs;
                tracing::debug!("Override dns.timeout_secs from env: {}", secs);
            }
        }

        if let Ok(val) = std::env::var("PERIMETER_PROGRESS_DIR") {
            config.progress.dir = Some(PathBuf::from(&val));
            tracing::debug!("Override progress.dir from env: {}", val);
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/perimeter/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "perimeter", "perimeter").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/perimeter`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "perimeter", "perimeter").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Subdomain enumeration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerationConfig {
    /// Ordered API credentials, tried in sequence until one succeeds
    pub api_keys: Vec<String>,
    /// Enumeration service base URL
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            endpoint: "https://api.securitytrails.com/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

/// DNS resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsConfig {
    /// Per-query timeout in seconds
    pub timeout_secs: u64,
    /// Query attempts per lookup
    pub attempts: usize,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            attempts: 1,
        }
    }
}

/// Organization attribution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionConfig {
    /// RDAP service base URL
    pub endpoint: String,
    /// Lookup attempts before giving up
    pub retry_attempts: u32,
    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://rdap.org".to_string(),
            retry_attempts: 2,
            timeout_secs: 10,
        }
    }
}

/// Progress store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Store directory override (defaults to `<data_dir>/progress`)
    pub dir: Option<PathBuf>,
    /// Seconds between background sweep passes
    pub sweep_interval_secs: u64,
    /// Seconds a completed record stays readable before expiry
    pub completed_ttl_secs: u64,
    /// Seconds an untouched record survives before the sweep removes it
    pub stale_ttl_secs: u64,
    /// Seconds an unreadable record survives before the sweep removes it
    pub unreadable_ttl_secs: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            dir: None,
            sweep_interval_secs: 300,
            completed_ttl_secs: 60,
            stale_ttl_secs: 1800,
            unreadable_ttl_secs: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.enumeration.api_keys.is_empty());
        assert_eq!(config.dns.timeout_secs, 10);
        assert_eq!(config.attribution.retry_attempts, 2);
        assert_eq!(config.progress.sweep_interval_secs, 300);
        assert_eq!(config.progress.completed_ttl_secs, 60);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[enumeration]"));
        assert!(toml_str.contains("[dns]"));
        assert!(toml_str.contains("[progress]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.dns.timeout_secs, config.dns.timeout_secs);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        // Create a custom config
        let mut config = AppConfig::default();
        config.enumeration.api_keys = vec!["key-one".to_string(), "key-two".to_string()];
        config.dns.timeout_secs = 5;

        // Save
        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        // Load
        let loaded_contents = fs::read_to_string(&config_path).expect("read config file");
        let loaded: AppConfig = toml::from_str(&loaded_contents).expect("parse loaded config");

        assert_eq!(loaded.enumeration.api_keys.len(), 2);
        assert_eq!(loaded.dns.timeout_secs, 5);
    }

    #[test]
    fn test_partial_config() {
        // Test that partial TOML configs work with defaults
        let toml_str = r#"
[enumeration]
api_keys = ["abc123"]

[progress]
sweep_interval_secs = 60
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.enumeration.api_keys, vec!["abc123".to_string()]);
        assert_eq!(config.progress.sweep_interval_secs, 60);
        // These should be defaults
        assert_eq!(config.dns.timeout_secs, 10);
        assert_eq!(config.progress.stale_ttl_secs, 1800);
    }

    #[test]
    fn test_api_keys_env_parsing() {
        let raw = " key-one, key-two ,,key-three ";
        let keys: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(ToString::to_string)
            .collect();
        assert_eq!(keys, vec!["key-one", "key-two", "key-three"]);
    }
}
