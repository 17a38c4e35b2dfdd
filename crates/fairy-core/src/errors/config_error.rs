//! Configuration errors.

use super::error_code::{self, FairyErrorCode};

/// Errors raised while resolving `fairy.toml`, the user config, and
/// `FAIRY_*` environment overrides.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}")]
    FileNotFound { path: String },

    #[error("Malformed TOML in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid setting {field}: {message}")]
    ValidationFailed { field: String, message: String },

    /// A `FAIRY_*` variable is set but cannot be parsed.
    #[error("Environment variable {var}={value:?} is not {expected}")]
    InvalidEnvVar {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl FairyErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
