//! Configuration management module
//!
//! Handles loading, validation, and management of application configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Root directory of the partitioned file store
    pub data_dir: String,

    /// Logging level
    pub log_level: String,

    /// Upstream (write-side) API configuration
    pub upstream: UpstreamConfig,

    /// Archive (read-side) configuration
    pub archive: ArchiveConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the upstream gold-price API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Raw-file base URL of the published store
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            log_level: "info".to_string(),
            upstream: UpstreamConfig::default(),
            archive: ArchiveConfig::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ms.jr.jd.com/gw/generic/hj/h5/m".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: "https://raw.githubusercontent.com/l123wx/gold/master/data".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        // GOLDTRACK_DATA_DIR - file store root
        if let Ok(data_dir) = env::var("GOLDTRACK_DATA_DIR") {
            if !data_dir.trim().is_empty() {
                self.data_dir = data_dir;
            }
        }

        // GOLDTRACK_LOG_LEVEL - logging level
        if let Ok(log_level) = env::var("GOLDTRACK_LOG_LEVEL") {
            self.log_level = log_level;
        }

        // GOLDTRACK_UPSTREAM_BASE_URL - upstream API base URL
        if let Ok(base_url) = env::var("GOLDTRACK_UPSTREAM_BASE_URL") {
            self.upstream.base_url = base_url;
        }

        // GOLDTRACK_UPSTREAM_TIMEOUT_SECONDS - upstream timeout
        if let Ok(timeout) = env::var("GOLDTRACK_UPSTREAM_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.upstream.timeout_seconds = value;
            }
        }

        // GOLDTRACK_ARCHIVE_BASE_URL - archive base URL
        if let Ok(base_url) = env::var("GOLDTRACK_ARCHIVE_BASE_URL") {
            self.archive.base_url = base_url;
        }

        // GOLDTRACK_ARCHIVE_TIMEOUT_SECONDS - archive timeout
        if let Ok(timeout) = env::var("GOLDTRACK_ARCHIVE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.archive.timeout_seconds = value;
            }
        }
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path).unwrap_or_else(|err| {
            tracing::warn!("Failed to load config: {}, using defaults", err);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            anyhow::bail!("Data directory must not be empty");
        }

        if self.upstream.base_url.trim().is_empty() {
            anyhow::bail!("Upstream base URL must not be empty");
        }

        if self.archive.base_url.trim().is_empty() {
            anyhow::bail!("Archive base URL must not be empty");
        }

        if self.upstream.timeout_seconds == 0 || self.archive.timeout_seconds == 0 {
            anyhow::bail!("Timeout must be greater than 0");
        }

        Ok(())
    }

    /// Display formatted configuration
    pub fn display(&self) -> Result<()> {
        println!("Current configuration:");
        println!("{:#?}", self);
        Ok(())
    }

    /// Display configuration management help
    pub fn display_help() -> Result<()> {
        println!("Configuration management commands:");
        println!("  goldtrack config show  - Show current configuration");
        println!("  goldtrack config reset - Reset to default configuration");
        Ok(())
    }

    /// Handle configuration command
    pub fn handle_command(action: &Option<crate::cli::ConfigAction>, config_file: &str) -> Result<()> {
        match action {
            Some(crate::cli::ConfigAction::Show) => {
                let config = Config::load_or_default(config_file);
                config.display()?;
            }
            Some(crate::cli::ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save_to_file(config_file)?;
                default_config.display()?;
            }
            None => {
                Config::display_help()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.data_dir, "data");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.upstream.base_url, deserialized.upstream.base_url);
    }

    #[test]
    fn test_config_file_operations() {
        let config = Config::default();
        let temp_file = NamedTempFile::new().unwrap();

        // Test save
        config.save_to_file(temp_file.path()).unwrap();

        // Test load
        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.data_dir, loaded_config.data_dir);
    }

    #[test]
    fn test_validation_rejects_empty_data_dir() {
        let mut config = Config::default();
        config.data_dir = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("data_dir = \"archive\"").unwrap();
        assert_eq!(config.data_dir, "archive");
        assert_eq!(config.upstream.timeout_seconds, 10);
    }
}
