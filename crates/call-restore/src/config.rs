//! Configuration for call restoration

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

/// Environment variable prefix, e.g. `CALL_RESTORE_ROOT_SECTION`
pub const ENV_PREFIX: &str = "CALL_RESTORE";

/// Main configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RestoreConfig {
    /// Member of the stored document holding the call-level fields
    pub root_section: String,
    pub log: LogSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
    pub file_info: bool,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            root_section: "json".to_string(),
            log: LogSettings::default(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_info: false,
        }
    }
}

impl RestoreConfig {
    /// Load from an optional TOML file, overridden by `CALL_RESTORE_*`
    /// environment variables. Nested keys use `__`, e.g.
    /// `CALL_RESTORE_LOG__LEVEL=debug`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
