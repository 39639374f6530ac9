//! Command handlers -- one module per subcommand

pub mod analyze;
pub mod config;

use std::path::Path;

use logsift_core::config::{DEFAULT_CONFIG_FILE, LogsiftConfig};
use logsift_core::error::LogsiftError;

/// Load the effective configuration.
///
/// An explicitly given file must exist. Without one, `logsift.toml` in the
/// working directory is used when present, otherwise built-in defaults
/// (environment overrides apply in both cases).
pub fn load_config(path: Option<&Path>) -> Result<LogsiftConfig, LogsiftError> {
    match path {
        Some(path) => LogsiftConfig::load(path),
        None => LogsiftConfig::load_or_default(DEFAULT_CONFIG_FILE),
    }
}

/// Human-readable name of the configuration source.
pub fn config_source(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => DEFAULT_CONFIG_FILE.to_owned(),
        None => "built-in defaults".to_owned(),
    }
}
