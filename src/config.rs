use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::ReasonThresholds;
use crate::core::scoring::{MIN_REASON_FACTOR_SCORE, MIN_REASON_PREFERENCE};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON or TOML catalog; the built-in catalog is used when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: None,
            ttl_secs: None,
        }
    }
}

fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_min_factor_score")]
    pub min_factor_score: u8,
    #[serde(default = "default_min_preference")]
    pub min_preference: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: None,
            max_limit: default_max_limit(),
            min_factor_score: default_min_factor_score(),
            min_preference: default_min_preference(),
        }
    }
}

impl MatchingSettings {
    /// Reject limits that would make every ranking come back empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_limit == 0 {
            return Err(ConfigError::Message("matching.max_limit must be at least 1".to_string()));
        }
        if self.default_limit == Some(0) {
            return Err(ConfigError::Message("matching.default_limit must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn reason_thresholds(&self) -> ReasonThresholds {
        ReasonThresholds {
            min_factor_score: self.min_factor_score,
            min_preference: self.min_preference,
        }
    }
}

fn default_max_limit() -> u16 { 100 }
fn default_min_factor_score() -> u8 { MIN_REASON_FACTOR_SCORE }
fn default_min_preference() -> f64 { MIN_REASON_PREFERENCE }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    // e.g., NEIGHBORHOOD__SERVER__PORT -> server.port
    Environment::with_prefix("NEIGHBORHOOD")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NEIGHBORHOOD__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.matching.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.matching.validate()?;
        Ok(settings)
    }
}
