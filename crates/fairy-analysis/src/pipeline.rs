//! Pipeline entry points: tables → diagnostics → findings → attestation → report.
//!
//! Inputs are read-only snapshots and every output is freshly allocated,
//! so independent runs may execute in parallel.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use fairy_core::config::FairyConfig;
use fairy_core::errors::{PipelineError, RulepackError};

use crate::diagnostics::{Diagnostic, DiagnosticEngine, DiagnosticSeverity, EngineSpec};
use crate::enforcement::attestation::{Attestation, AttestationAggregator, RunMetadata};
use crate::enforcement::reporters::markdown::MarkdownReporter;
use crate::enforcement::reporters::{FileMetadata, ReportDocument, ReportWriter};
use crate::enforcement::rulepack::{self, Rulepack, RulepackIdentity};
use crate::table::{read_tables, TableSet};

/// Result of a run: the attestation plus the diagnostics it was derived from.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub attestation: Attestation,
    pub diagnostics: Vec<Diagnostic>,
}

/// Evaluate one rulepack against a table set.
pub fn evaluate(
    tables: &TableSet,
    rulepack: &Rulepack,
    meta: &RunMetadata,
) -> Result<Attestation, PipelineError> {
    Ok(run(tables, std::slice::from_ref(rulepack), meta)?.attestation)
}

/// Evaluate several rulepacks in sequence into one attestation.
pub fn evaluate_many(
    tables: &TableSet,
    rulepacks: &[Rulepack],
    meta: &RunMetadata,
) -> Result<Attestation, PipelineError> {
    Ok(run(tables, rulepacks, meta)?.attestation)
}

/// Full run. The engine is configured from the union of every rulepack's
/// requirements; findings are concatenated in rulepack order.
pub fn run(
    tables: &TableSet,
    rulepacks: &[Rulepack],
    meta: &RunMetadata,
) -> Result<Evaluation, PipelineError> {
    let mut spec = EngineSpec::new();
    for pack in rulepacks {
        spec.extend(&pack.engine_spec());
    }
    let diagnostics = DiagnosticEngine::new(spec).run(tables);
    tracing::info!(
        tables = tables.len(),
        diagnostics = diagnostics.len(),
        "diagnostics produced"
    );

    let mut findings = Vec::new();
    for pack in rulepacks {
        findings.extend(pack.evaluate(&diagnostics, tables)?);
    }

    let identities: Vec<RulepackIdentity> = rulepacks.iter().map(Rulepack::identity).collect();
    let attestation = AttestationAggregator::aggregate(findings, &identities, meta)?;
    Ok(Evaluation {
        attestation,
        diagnostics,
    })
}

/// Per-file report metadata. `processed_at` is left unset.
pub fn file_metadata(
    tables: &TableSet,
    rulepacks: &[Rulepack],
    diagnostics: &[Diagnostic],
    max_warnings: usize,
) -> Vec<FileMetadata> {
    tables
        .iter()
        .map(|table| {
            let referenced: BTreeSet<&str> = rulepacks
                .iter()
                .flat_map(|p| p.fields_for(&table.source))
                .collect();
            let fields_validated = referenced
                .into_iter()
                .filter(|c| table.has_column(c))
                .map(str::to_string)
                .collect();

            let mut warnings: Vec<String> = diagnostics
                .iter()
                .filter(|d| d.table == table.source && d.severity != DiagnosticSeverity::Info)
                .map(|d| format!("{}: {}", d.path, d.message))
                .collect();
            warnings.sort();
            if warnings.len() > max_warnings {
                tracing::debug!(
                    file = %table.source,
                    total = warnings.len(),
                    kept = max_warnings,
                    "truncating file warnings"
                );
                warnings.truncate(max_warnings);
            }

            FileMetadata {
                name: table.source.clone(),
                sha256: table.sha256.clone(),
                bytes: table.bytes,
                n_rows: table.n_rows(),
                n_cols: table.n_cols(),
                fields_validated,
                warnings,
                processed_at: None,
            }
        })
        .collect()
}

/// Build, validate, and atomically persist the report.
pub fn write(
    attestation: &Attestation,
    files: Vec<FileMetadata>,
    destination: &Path,
    writer: &ReportWriter,
) -> Result<ReportDocument, PipelineError> {
    let document = writer.build(attestation, files);
    writer.write(&document, destination)?;
    Ok(document)
}

/// Rulepack named by config: a definition file wins over a preset.
pub fn resolve_rulepack(config: &FairyConfig) -> Result<Rulepack, RulepackError> {
    match config.rulepack.path.as_deref() {
        Some(path) => Rulepack::load(Path::new(path)),
        None => rulepack::by_name(config.rulepack.effective_preset()),
    }
}

/// What [`validate_submission`] produced.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub attestation: Attestation,
    pub report_path: PathBuf,
    pub summary_path: Option<PathBuf>,
}

/// Read tables from disk, evaluate the configured rulepack, and write the
/// report (plus a markdown summary if configured) into `out_dir`.
///
/// An invalid config or any input error aborts before a report is written.
pub fn validate_submission(
    paths: &[PathBuf],
    out_dir: &Path,
    config: &FairyConfig,
    meta: &RunMetadata,
) -> Result<SubmissionOutcome, PipelineError> {
    FairyConfig::validate(config)?;
    let tables = read_tables(paths, config.validation.delimiter_byte())?;

    let rulepacks = [resolve_rulepack(config)?];
    let evaluation = run(&tables, &rulepacks, meta)?;
    let files = file_metadata(
        &tables,
        &rulepacks,
        &evaluation.diagnostics,
        config.validation.effective_max_warnings(),
    );

    std::fs::create_dir_all(out_dir).map_err(|source| {
        fairy_core::errors::ReportError::Io {
            path: out_dir.to_path_buf(),
            source,
        }
    })?;

    let writer = ReportWriter::new(config.report.effective_pretty());
    let report_path = out_dir.join(config.report.effective_filename());
    let document = write(&evaluation.attestation, files, &report_path, &writer)?;

    let summary_path = if config.report.effective_markdown() {
        let path = report_path.with_extension("md");
        writer.write_with(&MarkdownReporter, &document, &path)?;
        Some(path)
    } else {
        None
    };

    Ok(SubmissionOutcome {
        attestation: evaluation.attestation,
        report_path,
        summary_path,
    })
}
