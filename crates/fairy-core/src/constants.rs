//! Shared constants for the FAIRy preflight engine.

/// Engine version string, recorded as `fairy_version` in attestations.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default cap on warnings listed per input file.
pub const DEFAULT_MAX_WARNINGS_PER_FILE: usize = 200;

/// Default rulepack preset.
pub const DEFAULT_RULEPACK_PRESET: &str = "GEO-SEQ-BULK";

/// Default report file name.
pub const DEFAULT_REPORT_FILENAME: &str = "report.json";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "fairy.toml";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "FAIRY_LOG";

/// Log filter used when `FAIRY_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "fairy=info";
