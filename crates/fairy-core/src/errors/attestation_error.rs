//! Attestation invariant errors.
//!
//! These are bug-class: a well-formed aggregator never produces them.

use super::error_code::{self, FairyErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum AttestationError {
    #[error("Recorded {field} is {recorded}, but findings contain {actual}")]
    CountMismatch {
        field: &'static str,
        recorded: usize,
        actual: usize,
    },

    #[error("submission_ready is {recorded} but fail_count is {fail_count}")]
    ReadinessMismatch { recorded: bool, fail_count: usize },

    #[error("Findings out of order at index {index}")]
    UnsortedFindings { index: usize },
}

impl FairyErrorCode for AttestationError {
    fn error_code(&self) -> &'static str {
        error_code::ATTESTATION_INVARIANT
    }
}
