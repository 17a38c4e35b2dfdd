//! Top-level pipeline error.

use super::error_code::FairyErrorCode;
use super::{AttestationError, ConfigError, ReportError, RulepackError, TableError};

/// The single fatal reason a run can fail with.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Rulepack error: {0}")]
    Rulepack(#[from] RulepackError),

    #[error("Attestation error: {0}")]
    Attestation(#[from] AttestationError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// True when the failure is a defect in the engine rather than a
    /// problem with the caller's input or configuration.
    pub fn is_internal(&self) -> bool {
        match self {
            Self::Attestation(_) => true,
            Self::Report(e) => e.is_internal(),
            _ => false,
        }
    }
}

impl FairyErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Table(e) => e.error_code(),
            Self::Rulepack(e) => e.error_code(),
            Self::Attestation(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
