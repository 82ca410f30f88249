//! # Configuration Management for RowHaus
//!
//! This crate provides the configuration structures that decide how result rows are scanned:
//! which rule table is used to match columns, how timestamps are rendered, and how many rows a
//! single scan may return.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{MatchStrategy, ScanConfig, TimePolicy};
//!
//! let scan_config = ScanConfig::new(MatchStrategy::DatabaseType, TimePolicy::Frame, Some(8888));
//! assert_eq!(scan_config.max_rows, Some(8888));
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [scan]
//! match_strategy = "database_type"
//! time_policy = "local"
//! max_rows = 8888
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from rowhaus.toml (or the file named by ROWHAUS_CONFIG)
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, fmt, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./rowhaus.toml";
const CONFIG_PATH_ENV: &str = "ROWHAUS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which column descriptor the rule table is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Coarse driver scan shapes (`NullInt64`, `NullTime`, ...)
    ScanShape,
    /// Exact database type names (`TINYINT`, `DATETIME`, ...)
    #[default]
    DatabaseType,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::ScanShape => write!(f, "scan_shape"),
            MatchStrategy::DatabaseType => write!(f, "database_type"),
        }
    }
}

/// How date/time columns are rendered by the database type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimePolicy {
    /// Instants are shifted into the local time zone
    #[default]
    Local,
    /// Instants stay in UTC, `TIMESTAMP` columns become Unix epoch seconds
    Frame,
}

impl fmt::Display for TimePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimePolicy::Local => write!(f, "local"),
            TimePolicy::Frame => write!(f, "frame"),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Row scan configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub match_strategy: MatchStrategy,
    #[serde(default)]
    pub time_policy: TimePolicy,
    /// Upper bound on rows returned by one scan, `None` for no limit
    #[serde(default)]
    pub max_rows: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            match_strategy: MatchStrategy::DatabaseType,
            time_policy: TimePolicy::Local,
            max_rows: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file named in .env or the default path
    pub fn load() -> Result<Self, ConfigError> {
        let config = {
            if let Err(err) = dotenvy::dotenv() {
                // A missing .env file is fine, a broken one is not
                if !err.not_found() {
                    return Err(err.into());
                }
            }

            if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
                Self::from_file(&config_path)
            } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
                Self::from_file(DEFAULT_CONFIG_PATH)
            } else {
                Err(ConfigError::Invalid(format!(
                    "Config path must be specified in .env file as {} or in {} file",
                    CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
                )))
            }
        }?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        self.scan.validate()
    }
}

impl ScanConfig {
    /// Create a new scan configuration
    pub fn new(
        match_strategy: MatchStrategy,
        time_policy: TimePolicy,
        max_rows: Option<usize>,
    ) -> Self {
        Self {
            match_strategy,
            time_policy,
            max_rows,
        }
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Validate scan settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rows == Some(0) {
            return Err(ConfigError::Invalid(
                "Scan max_rows must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
