//! TOML configuration file support.
//!
//! Comparison defaults can be kept in a file instead of repeating flags:
//!
//! ```toml
//! # mzxml-diff.toml
//! [compare]
//! headers = true
//! peaks = true
//! zero_intensity = false
//! fail_on_diff = true
//! mz_tolerance = 0.0001
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mzxml_diff::compare::CompareOptions;

/// Root configuration structure for mzxml-diff.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Comparison settings.
    #[serde(default)]
    pub compare: CompareConfig,
}

/// Configuration for the comparison.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareConfig {
    /// Compare scan headers.
    pub headers: Option<bool>,

    /// Compare peak lists.
    pub peaks: Option<bool>,

    /// Keep zero-intensity peaks in the peak comparison.
    pub zero_intensity: Option<bool>,

    /// Exit with status 2 when differences were reported.
    pub fail_on_diff: Option<bool>,

    /// m/z tolerance of the peak comparison.
    pub mz_tolerance: Option<f64>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML configuration")?;
        if let Some(tolerance) = config.compare.mz_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                anyhow::bail!("mz_tolerance must be a non-negative number, got {}", tolerance);
            }
        }
        Ok(config)
    }
}

impl CompareConfig {
    /// Comparison options with unset keys at their defaults
    pub fn options(&self) -> CompareOptions {
        let defaults = CompareOptions::default();
        CompareOptions {
            headers: self.headers.unwrap_or(defaults.headers),
            peaks: self.peaks.unwrap_or(defaults.peaks),
            zero_intensity: self.zero_intensity.unwrap_or(defaults.zero_intensity),
            mz_tolerance: self.mz_tolerance.unwrap_or(defaults.mz_tolerance),
        }
    }
}
