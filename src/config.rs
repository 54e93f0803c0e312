//! Application configuration.
//!
//! Values come from built-in defaults, then `YUEDICT_*` environment
//! variables, then command-line flags applied by the binary.

use std::path::PathBuf;

use crate::dictionary::LookupLimits;

/// Default listen address for the HTTP server
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Default rows per listing page
pub const DEFAULT_PAGE_SIZE: u64 = 50;

pub const ENV_BIND: &str = "YUEDICT_BIND";
pub const ENV_DATA_DIR: &str = "YUEDICT_DATA_DIR";
pub const ENV_EXACT_LIMIT: &str = "YUEDICT_EXACT_LIMIT";
pub const ENV_PARTIAL_LIMIT: &str = "YUEDICT_PARTIAL_LIMIT";

/// Error types for configuration loading
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: expected a positive integer")]
    InvalidNumber { key: String, value: String },
}

/// Runtime configuration shared by the server and the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind: String,
    /// Directory holding the database file
    pub data_dir: PathBuf,
    /// Row caps for per-token lookups
    pub limits: LookupLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            data_dir: default_data_dir(),
            limits: LookupLimits::default(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by any `YUEDICT_*` variables that are set
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = non_blank(lookup(ENV_BIND)) {
            config.bind = bind;
        }
        if let Some(dir) = non_blank(lookup(ENV_DATA_DIR)) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(value) = non_blank(lookup(ENV_EXACT_LIMIT)) {
            config.limits.exact = parse_limit(ENV_EXACT_LIMIT, &value)?;
        }
        if let Some(value) = non_blank(lookup(ENV_PARTIAL_LIMIT)) {
            config.limits.partial = parse_limit(ENV_PARTIAL_LIMIT, &value)?;
        }

        Ok(config)
    }
}

/// `<platform data dir>/yuedict`, or `./yuedict` when the platform has none
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("yuedict"))
        .unwrap_or_else(|| PathBuf::from(".").join("yuedict"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a strictly positive row cap
pub fn parse_limit(key: &str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
