//! ReportWriter — assemble, validate, and atomically persist reports.

use std::path::{Path, PathBuf};

use fairy_core::errors::ReportError;

use super::json::JsonReporter;
use super::schema::validate_report;
use super::types::{FileMetadata, ReportDocument};
use super::Reporter;
use crate::enforcement::attestation::Attestation;

#[derive(Debug, Clone, Copy)]
pub struct ReportWriter {
    pretty: bool,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ReportWriter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    /// Assemble a document with every list in canonical order: findings
    /// by `(severity, code, where)`, files by name, per-file lists
    /// lexicographically.
    pub fn build(&self, attestation: &Attestation, files: Vec<FileMetadata>) -> ReportDocument {
        let mut findings = attestation.findings.clone();
        findings.sort_by(|a, b| a.sort_cmp(b));

        let mut files: Vec<FileMetadata> = files
            .into_iter()
            .map(|mut f| {
                f.fields_validated.sort();
                f.fields_validated.dedup();
                f.warnings.sort();
                f
            })
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        ReportDocument {
            rulepack_id: attestation.rulepack_id.clone(),
            rulepack_version: attestation.rulepack_version.clone(),
            fairy_version: attestation.fairy_version.clone(),
            run_at_utc: attestation.run_at_utc.clone(),
            submission_ready: attestation.submission_ready,
            fail_count: attestation.fail_count,
            warn_count: attestation.warn_count,
            findings,
            files,
        }
    }

    /// Serialize to JSON after checking the attestation invariants and the
    /// report schema. Either check failing is a writer defect.
    pub fn render(&self, document: &ReportDocument) -> Result<String, ReportError> {
        if let Err(e) = document.attestation().verify() {
            return Err(internal(ReportError::SchemaViolation {
                errors: vec![e.to_string()],
            }));
        }

        let value = serde_json::to_value(document).map_err(|e| {
            internal(ReportError::Serialization {
                message: e.to_string(),
            })
        })?;
        validate_report(&value).map_err(internal)?;

        let rendered = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        }
        .map_err(|e| {
            internal(ReportError::Serialization {
                message: e.to_string(),
            })
        })?;
        Ok(rendered + "\n")
    }

    /// Render and atomically write the JSON report to `destination`.
    pub fn write(&self, document: &ReportDocument, destination: &Path) -> Result<(), ReportError> {
        self.write_with(&JsonReporter::new(self.pretty), document, destination)
    }

    /// Render with any reporter and atomically write the result.
    ///
    /// Nothing touches `destination` unless rendering succeeded.
    pub fn write_with(
        &self,
        reporter: &dyn Reporter,
        document: &ReportDocument,
        destination: &Path,
    ) -> Result<(), ReportError> {
        let contents = reporter.generate(document)?;
        write_atomic(destination, contents.as_bytes())?;
        tracing::info!(
            format = reporter.name(),
            path = %destination.display(),
            bytes = contents.len(),
            "report written"
        );
        Ok(())
    }
}

fn internal(error: ReportError) -> ReportError {
    tracing::error!(target: "fairy::internal", error = %error, "report writer defect");
    error
}

/// Write to a sibling temp file, then rename over `destination`.
fn write_atomic(destination: &Path, contents: &[u8]) -> Result<(), ReportError> {
    let tmp = temp_path(destination);
    let io_err = |source| ReportError::Io {
        path: destination.to_path_buf(),
        source,
    };

    std::fs::write(&tmp, contents).map_err(io_err)?;
    if let Err(source) = std::fs::rename(&tmp, destination) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(source));
    }
    Ok(())
}

fn temp_path(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    destination.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}
