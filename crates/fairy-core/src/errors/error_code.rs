//! FairyErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable
/// code alongside its human message.
pub trait FairyErrorCode {
    /// Returns the error code string (e.g., "TABLE_PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const TABLE_IO_ERROR: &str = "TABLE_IO_ERROR";
pub const TABLE_PARSE_ERROR: &str = "TABLE_PARSE_ERROR";
pub const TABLE_ENCODING_ERROR: &str = "TABLE_ENCODING_ERROR";
pub const TABLE_DUPLICATE_SOURCE: &str = "TABLE_DUPLICATE_SOURCE";
pub const MISSING_TABLE: &str = "MISSING_TABLE";
pub const RULEPACK_INVALID: &str = "RULEPACK_INVALID";
pub const ATTESTATION_INVARIANT: &str = "ATTESTATION_INVARIANT";
pub const SCHEMA_VIOLATION: &str = "SCHEMA_VIOLATION";
pub const REPORT_IO_ERROR: &str = "REPORT_IO_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
