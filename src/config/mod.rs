//! Configuration for sitescan

mod dedup;
mod logging;
mod report;
mod scan;

pub use dedup::{DedupConfig, SimilarityBasis};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use report::ReportConfig;
pub use scan::{RulesConfig, ScanConfig};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name written by `sitescan init`
pub const DEFAULT_CONFIG_FILE: &str = "sitescan.toml";

/// Main configuration for a scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// File selection
    #[serde(default)]
    pub scan: ScanConfig,
    /// Policy rule sets
    #[serde(default)]
    pub rules: RulesConfig,
    /// Duplicate detection
    #[serde(default)]
    pub dedup: DedupConfig,
    /// Report presentation limits
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file '{}': {:#}", path.display(), e))
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration fields.
    ///
    /// Collects every error and reports them together.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        // Scan validation
        if self.scan.extensions.is_empty() {
            errors.push("scan.extensions must name at least one extension".to_string());
        }
        if self.scan.extensions.iter().any(|e| e.trim().is_empty()) {
            errors.push("scan.extensions must not contain empty entries".to_string());
        }

        // Rules validation
        for (name, list) in [
            ("adult_keywords", &self.rules.adult_keywords),
            ("copyright_keywords", &self.rules.copyright_keywords),
            ("executable_extensions", &self.rules.executable_extensions),
            ("stock_image_hosts", &self.rules.stock_image_hosts),
        ] {
            if list.iter().any(|k| k.is_empty()) {
                errors.push(format!("rules.{} must not contain empty entries", name));
            }
        }
        if self.rules.min_base64_run == 0 {
            errors.push("rules.min_base64_run must be positive".to_string());
        }

        // Dedup validation
        if !(0.0..=1.0).contains(&self.dedup.near_threshold) {
            errors.push("dedup.near_threshold must be between 0.0 and 1.0".to_string());
        }
        if let Some(bits) = self.dedup.simhash_prefilter {
            if bits > 64 {
                errors.push(format!(
                    "dedup.simhash_prefilter must be at most 64 bits, got {}",
                    bits
                ));
            }
        }

        // Report validation
        if self.report.max_examples == 0 {
            errors.push("report.max_examples must be positive".to_string());
        }
        if self.report.top_hosts == 0 {
            errors.push("report.top_hosts must be positive".to_string());
        }
        if self.report.max_near_pairs == 0 {
            errors.push("report.max_near_pairs must be positive".to_string());
        }
        if self.report.preview_len == 0 {
            errors.push("report.preview_len must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}
