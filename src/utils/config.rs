//! Configuration and constants for the CLI.

use super::error::ConfigError;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default timeout for API requests
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default HTTP endpoint of the database's JSON API
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Path of the JSON API below the endpoint
pub const API_PATH: &str = "/api/1.0/";

/// Default seconds between polls in watch mode
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

// AVG is reported in nanoseconds; dividing by 1e8 puts typical values in a
// convenient charting range
pub const LATENCY_SCALE_DIVISOR: f64 = 100_000_000.0;

// Per-partition execution time is in nanoseconds, latency is shown in ms
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Default number of bars per chart
pub const DEFAULT_TOP_N: usize = 20;

// Statistics selectors and column names
pub const PROFILE_SELECTOR: &str = "PROCEDUREPROFILE";
pub const DETAIL_SELECTOR: &str = "PROCEDURE";
pub const COL_PROCEDURE: &str = "PROCEDURE";
pub const COL_AVG: &str = "AVG";
pub const COL_INVOCATIONS: &str = "INVOCATIONS";
pub const COL_AVG_EXECUTION_TIME: &str = "AVG_EXECUTION_TIME";

// Snapshot file keys
pub const SNAPSHOT_PROFILE_KEY: &str = "PROCEDURE_PROFILE";
pub const SNAPSHOT_DETAILS_KEY: &str = "PROCEDURE_DETAILS";

/// Settings read from an optional TOML file.
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub top: Option<usize>,
}

impl FileConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: FileConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.top == Some(0) {
            return Err(ConfigError::InvalidValue("top must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Request timeout, falling back to the default
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }
}
