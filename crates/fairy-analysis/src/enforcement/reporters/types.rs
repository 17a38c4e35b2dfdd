//! Persisted report document.

use serde::{Deserialize, Serialize};

use crate::enforcement::attestation::Attestation;
use crate::enforcement::rules::Finding;

/// Metadata recorded for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub sha256: String,
    pub bytes: u64,
    pub n_rows: usize,
    pub n_cols: usize,
    pub fields_validated: Vec<String>,
    pub warnings: Vec<String>,
    /// RFC 3339; omitted unless the caller supplies it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
}

/// The report as written to disk: attestation header, findings, files.
///
/// Field order here is the key order of the serialized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub rulepack_id: String,
    pub rulepack_version: String,
    pub fairy_version: String,
    pub run_at_utc: String,
    pub submission_ready: bool,
    pub fail_count: usize,
    pub warn_count: usize,
    pub findings: Vec<Finding>,
    pub files: Vec<FileMetadata>,
}

impl ReportDocument {
    /// The attestation embedded in this document.
    pub fn attestation(&self) -> Attestation {
        Attestation {
            rulepack_id: self.rulepack_id.clone(),
            rulepack_version: self.rulepack_version.clone(),
            fairy_version: self.fairy_version.clone(),
            run_at_utc: self.run_at_utc.clone(),
            submission_ready: self.submission_ready,
            fail_count: self.fail_count,
            warn_count: self.warn_count,
            findings: self.findings.clone(),
        }
    }
}
