//! Rulepack configuration errors.

use std::path::PathBuf;

use super::error_code::{self, FairyErrorCode};

/// Errors that prevent a rulepack from being built or evaluated.
#[derive(Debug, thiserror::Error)]
pub enum RulepackError {
    #[error("Rule {rule} requires table {table}, which was not supplied")]
    MissingTable { rule: String, table: String },

    #[error("Invalid rulepack definition: {message}")]
    InvalidDefinition { message: String },

    #[error("Invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Unknown rulepack preset: {name}")]
    UnknownPreset { name: String },

    #[error("IO error reading rulepack {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FairyErrorCode for RulepackError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTable { .. } => error_code::MISSING_TABLE,
            _ => error_code::RULEPACK_INVALID,
        }
    }
}
