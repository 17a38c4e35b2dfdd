//! Attestation — the terminal verdict of one run.

use chrono::{DateTime, SecondsFormat, Utc};
use fairy_core::errors::AttestationError;
use serde::{Deserialize, Serialize};

use crate::enforcement::rules::{Finding, FindingSeverity};

/// Tool version and timestamp for a run, passed in explicitly so runs are
/// reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    pub fairy_version: String,
    pub run_at: DateTime<Utc>,
}

impl RunMetadata {
    pub fn new(fairy_version: &str, run_at: DateTime<Utc>) -> Self {
        Self {
            fairy_version: fairy_version.to_string(),
            run_at,
        }
    }

    /// This build's version, stamped with the current time.
    pub fn now() -> Self {
        Self::new(fairy_core::constants::VERSION, Utc::now())
    }

    /// RFC 3339, second precision, `Z` suffix.
    pub fn run_at_utc(&self) -> String {
        self.run_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attestation {
    pub rulepack_id: String,
    pub rulepack_version: String,
    pub fairy_version: String,
    pub run_at_utc: String,
    pub submission_ready: bool,
    pub fail_count: usize,
    pub warn_count: usize,
    pub findings: Vec<Finding>,
}

impl Attestation {
    /// Number of findings with `severity`, by enumeration.
    pub fn count(&self, severity: FindingSeverity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Re-check the count, readiness, and ordering invariants.
    pub fn verify(&self) -> Result<(), AttestationError> {
        let fails = self.count(FindingSeverity::Fail);
        if self.fail_count != fails {
            return Err(AttestationError::CountMismatch {
                field: "fail_count",
                recorded: self.fail_count,
                actual: fails,
            });
        }
        let warns = self.count(FindingSeverity::Warn);
        if self.warn_count != warns {
            return Err(AttestationError::CountMismatch {
                field: "warn_count",
                recorded: self.warn_count,
                actual: warns,
            });
        }
        if self.submission_ready != (self.fail_count == 0) {
            return Err(AttestationError::ReadinessMismatch {
                recorded: self.submission_ready,
                fail_count: self.fail_count,
            });
        }
        if let Some(index) = self
            .findings
            .windows(2)
            .position(|w| w[0].sort_cmp(&w[1]).is_gt())
        {
            return Err(AttestationError::UnsortedFindings { index: index + 1 });
        }
        Ok(())
    }
}
