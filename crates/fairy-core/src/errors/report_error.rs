//! Report writer errors.

use std::path::PathBuf;

use super::error_code::{self, FairyErrorCode};

/// Errors raised while rendering or persisting a report.
///
/// `SchemaViolation` and `SchemaUnavailable` mean the writer itself is
/// broken; they are never a statement about the submission.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report failed its own schema ({} errors): {}", errors.len(), errors.join("; "))]
    SchemaViolation { errors: Vec<String> },

    #[error("Report schema could not be compiled: {message}")]
    SchemaUnavailable { message: String },

    #[error("Report serialization failed: {message}")]
    Serialization { message: String },

    #[error("IO error writing report {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ReportError {
    /// True for errors that indicate a defect in the writer.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::SchemaViolation { .. } | Self::SchemaUnavailable { .. } | Self::Serialization { .. }
        )
    }
}

impl FairyErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::REPORT_IO_ERROR,
            _ => error_code::SCHEMA_VIOLATION,
        }
    }
}
