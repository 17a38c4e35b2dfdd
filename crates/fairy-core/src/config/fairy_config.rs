//! Top-level FAIRy configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ReportConfig, RulepackConfig, ValidationConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Caller overrides (applied via `apply_overrides`)
/// 2. Environment variables (`FAIRY_*`)
/// 3. Project config (`fairy.toml` in the project root)
/// 4. User config (`~/.fairy/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FairyConfig {
    pub validation: ValidationConfig,
    pub rulepack: RulepackConfig,
    pub report: ReportConfig,
}

/// Overrides supplied by the embedding tool (e.g. command-line flags).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub delimiter: Option<String>,
    pub rulepack_preset: Option<String>,
    pub rulepack_path: Option<String>,
    pub report_filename: Option<String>,
    pub report_markdown: Option<bool>,
}

impl FairyConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Unreadable files are skipped,
        // but a file that exists and fails to parse is fatal.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &FairyConfig) -> Result<(), ConfigError> {
        if let Some(ref delimiter) = config.validation.delimiter {
            if config.validation.delimiter_byte().is_none() {
                return Err(ConfigError::ValidationFailed {
                    field: "validation.delimiter".to_string(),
                    message: format!("must be a single ASCII character, got {delimiter:?}"),
                });
            }
        }
        if config.validation.max_warnings_per_file == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "validation.max_warnings_per_file".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref filename) = config.report.filename {
            if !filename.ends_with(".json") || filename.contains(['/', '\\']) {
                return Err(ConfigError::ValidationFailed {
                    field: "report.filename".to_string(),
                    message: "must be a bare file name ending in .json".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.fairy/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".fairy").join("config.toml"))
    }

    fn merge_toml_file(config: &mut FairyConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FairyConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut FairyConfig, other: &FairyConfig) {
        if other.validation.delimiter.is_some() {
            base.validation.delimiter = other.validation.delimiter.clone();
        }
        if other.validation.max_warnings_per_file.is_some() {
            base.validation.max_warnings_per_file = other.validation.max_warnings_per_file;
        }

        if other.rulepack.preset.is_some() {
            base.rulepack.preset = other.rulepack.preset.clone();
        }
        if other.rulepack.path.is_some() {
            base.rulepack.path = other.rulepack.path.clone();
        }

        if other.report.filename.is_some() {
            base.report.filename = other.report.filename.clone();
        }
        if other.report.pretty.is_some() {
            base.report.pretty = other.report.pretty;
        }
        if other.report.markdown.is_some() {
            base.report.markdown = other.report.markdown;
        }
    }

    /// Apply `FAIRY_*` environment variable overrides. A set but
    /// unparseable value is an error rather than silently ignored.
    fn apply_env_overrides(config: &mut FairyConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("FAIRY_DELIMITER") {
            config.validation.delimiter = Some(val);
        }
        if let Ok(val) = std::env::var("FAIRY_MAX_WARNINGS") {
            let v = val.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvVar {
                var: "FAIRY_MAX_WARNINGS",
                value: val.clone(),
                expected: "a non-negative integer",
            })?;
            config.validation.max_warnings_per_file = Some(v);
        }
        if let Ok(val) = std::env::var("FAIRY_RULEPACK") {
            config.rulepack.preset = Some(val);
        }
        if let Ok(val) = std::env::var("FAIRY_RULEPACK_PATH") {
            config.rulepack.path = Some(val);
        }
        if let Ok(val) = std::env::var("FAIRY_REPORT_FILENAME") {
            config.report.filename = Some(val);
        }
        if let Ok(val) = std::env::var("FAIRY_REPORT_MARKDOWN") {
            let v = val.trim().parse::<bool>().map_err(|_| ConfigError::InvalidEnvVar {
                var: "FAIRY_REPORT_MARKDOWN",
                value: val.clone(),
                expected: "true or false",
            })?;
            config.report.markdown = Some(v);
        }
        Ok(())
    }

    /// Apply caller overrides (highest priority).
    fn apply_overrides(config: &mut FairyConfig, overrides: &ConfigOverrides) {
        if let Some(ref v) = overrides.delimiter {
            config.validation.delimiter = Some(v.clone());
        }
        if let Some(ref v) = overrides.rulepack_preset {
            config.rulepack.preset = Some(v.clone());
        }
        if let Some(ref v) = overrides.rulepack_path {
            config.rulepack.path = Some(v.clone());
        }
        if let Some(ref v) = overrides.report_filename {
            config.report.filename = Some(v.clone());
        }
        if let Some(v) = overrides.report_markdown {
            config.report.markdown = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
