//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section is optional and
//! falls back to its defaults; CLI flags override file values.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

mod logging;
mod scan;

pub use crate::pipeline::DetectorConfig;
pub use logging::LoggingConfig;
pub use scan::ScanConfig;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when it exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.detector.min_ev.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "min_ev",
                reason: "must be a finite number".into(),
            }
            .into());
        }
        if self.detector.min_bookmakers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_bookmakers",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.scan.max_concurrent_events == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrent_events",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected \"pretty\" or \"json\", got \"{}\"", self.logging.format),
            }
            .into());
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
