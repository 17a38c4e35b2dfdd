//! End-to-end tests: files on disk through to the persisted report.

mod common;

use std::path::{Path, PathBuf};

use fairy_analysis::diagnostics::DiagnosticSeverity;
use fairy_analysis::enforcement::reporters::{validate_report, ReportDocument};
use fairy_analysis::enforcement::rulepack::presets;
use fairy_analysis::pipeline::{self, SubmissionOutcome};
use fairy_core::config::FairyConfig;
use fairy_core::errors::{ConfigError, FairyErrorCode, PipelineError, RulepackError, TableError};
use tempfile::TempDir;

fn write_inputs(dir: &Path, entries: &[(&str, &str)]) -> Vec<PathBuf> {
    entries
        .iter()
        .map(|(name, text)| {
            let path = dir.join(name);
            std::fs::write(&path, text).unwrap();
            path
        })
        .collect()
}

fn submit(entries: &[(&str, &str)], config: &FairyConfig) -> (TempDir, Result<SubmissionOutcome, PipelineError>) {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    std::fs::create_dir(&inputs).unwrap();
    let paths = write_inputs(&inputs, entries);
    let result = pipeline::validate_submission(&paths, &dir.path().join("out"), config, &common::meta());
    (dir, result)
}

fn defective_samples() -> String {
    common::samples_with_rows(&[
        common::sample_row("S1", &[]),
        common::sample_row("S2", &[("organism", ""), ("collection_date", "May 2024")]),
    ])
}

#[test]
fn test_clean_submission_is_ready() {
    let (_dir, result) = submit(
        &[("samples.tsv", &common::good_samples()), ("files.tsv", &common::good_files())],
        &FairyConfig::default(),
    );
    let outcome = result.unwrap();

    assert!(outcome.attestation.submission_ready);
    assert_eq!(outcome.attestation.fail_count, 0);
    assert_eq!(outcome.report_path.file_name().unwrap(), "report.json");
    assert!(outcome.summary_path.is_none());

    let text = std::fs::read_to_string(&outcome.report_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    validate_report(&value).unwrap();

    let doc: ReportDocument = serde_json::from_value(value).unwrap();
    assert_eq!(doc.rulepack_id, "GEO-SEQ-BULK");
    let names: Vec<&str> = doc.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["files.tsv", "samples.tsv"]);
    assert_eq!(doc.files[1].n_rows, 2);
    assert_eq!(doc.files[1].n_cols, 11);
    assert_eq!(doc.files[1].bytes, common::good_samples().len() as u64);
    assert_eq!(doc.files[1].sha256.len(), 64);
}

#[test]
fn test_defects_become_findings_in_report() {
    let (_dir, result) = submit(
        &[("samples.tsv", &defective_samples()), ("files.tsv", &common::files_for(&["S1"]))],
        &FairyConfig::default(),
    );
    let outcome = result.unwrap();
    let att = &outcome.attestation;

    assert!(!att.submission_ready);
    let codes: Vec<&str> = att.findings.iter().map(|f| f.code.as_str()).collect();
    assert!(codes.contains(&"GEO.REQ.MISSING_FIELD"));
    assert!(codes.contains(&"CORE.ID.UNMATCHED_SAMPLE"));
    assert!(codes.contains(&"CORE.DATE.INVALID_ISO8601"));

    let doc: ReportDocument =
        serde_json::from_str(&std::fs::read_to_string(&outcome.report_path).unwrap()).unwrap();
    assert_eq!(doc.fail_count, att.fail_count);
    assert_eq!(doc.warn_count, att.warn_count);
    assert_eq!(doc.findings, att.findings);

    let samples = doc.files.iter().find(|f| f.name == "samples.tsv").unwrap();
    assert!(samples
        .warnings
        .iter()
        .any(|w| w.starts_with("rows/1/columns/organism: ")));
}

#[test]
fn test_repeated_runs_write_identical_bytes() {
    let entries = [("samples.tsv", defective_samples()), ("files.tsv", common::files_for(&["S1"]))];
    let entries: Vec<(&str, &str)> = entries.iter().map(|(n, t)| (*n, t.as_str())).collect();

    let (_a, first) = submit(&entries, &FairyConfig::default());
    let (_b, second) = submit(&entries, &FairyConfig::default());
    let first = std::fs::read(first.unwrap().report_path).unwrap();
    let second = std::fs::read(second.unwrap().report_path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_markdown_summary_when_configured() {
    let config = FairyConfig::from_toml(
        r#"
[report]
filename = "preflight.json"
markdown = true
"#,
    )
    .unwrap();
    let (_dir, result) = submit(
        &[("samples.tsv", &common::good_samples()), ("files.tsv", &common::good_files())],
        &config,
    );
    let outcome = result.unwrap();

    assert_eq!(outcome.report_path.file_name().unwrap(), "preflight.json");
    let summary = outcome.summary_path.unwrap();
    assert_eq!(summary.file_name().unwrap(), "preflight.md");
    let md = std::fs::read_to_string(summary).unwrap();
    assert!(md.contains("- Submission ready: **yes**"));
    assert!(md.contains("No findings."));
}

#[test]
fn test_ragged_table_aborts_without_report() {
    let ragged = format!("{}S3\tonly-two\n", common::good_samples());
    let (dir, result) = submit(
        &[("samples.tsv", &ragged), ("files.tsv", &common::good_files())],
        &FairyConfig::default(),
    );

    let err = result.unwrap_err();
    assert!(matches!(err, PipelineError::Table(TableError::RaggedRow { .. })));
    assert!(!err.is_internal());
    assert_eq!(err.error_code(), "TABLE_PARSE_ERROR");
    assert!(!dir.path().join("out").join("report.json").exists());
}

#[test]
fn test_missing_table_aborts_without_report() {
    let (dir, result) = submit(&[("samples.tsv", &common::good_samples())], &FairyConfig::default());

    match result.unwrap_err() {
        PipelineError::Rulepack(RulepackError::MissingTable { table, .. }) => {
            assert_eq!(table, "files.tsv")
        }
        other => panic!("expected MissingTable, got {other:?}"),
    }
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_csv_inputs_use_comma() {
    let samples = common::good_samples().replace('\t', ",");
    let files = common::good_files().replace('\t', ",");
    let config = FairyConfig::from_toml("[rulepack]\npreset = \"GENERIC\"\n").unwrap();
    let (_dir, result) = submit(&[("samples.csv", &samples), ("files.csv", &files)], &config);
    let outcome = result.unwrap();

    assert_eq!(outcome.attestation.rulepack_id, "GENERIC");
    assert!(outcome.attestation.submission_ready);
    let doc: ReportDocument =
        serde_json::from_str(&std::fs::read_to_string(&outcome.report_path).unwrap()).unwrap();
    let samples = doc.files.iter().find(|f| f.name == "samples.csv").unwrap();
    assert_eq!(samples.n_cols, 11);
    assert!(samples.fields_validated.is_empty());
}

#[test]
fn test_rulepack_file_takes_precedence_over_preset() {
    let dir = TempDir::new().unwrap();
    let pack_path = dir.path().join("pack.json");
    std::fs::write(
        &pack_path,
        r#"{"rulepack_id":"LAB-LOCAL","rulepack_version":"2.0.0","rules":[
            {"code":"LAB.REQ.OPERATOR","why":"who ran it","how_to_fix":"add operator",
             "check":{"type":"require_columns","table":"samples.tsv","required_columns":["operator"]}}]}"#,
    )
    .unwrap();
    let mut config = FairyConfig::default();
    config.rulepack.preset = Some("GEO-SEQ-BULK".to_string());
    config.rulepack.path = Some(pack_path.display().to_string());

    let pack = pipeline::resolve_rulepack(&config).unwrap();
    assert_eq!(pack.id(), "LAB-LOCAL");

    let att = pipeline::evaluate(&common::good_tables(), &pack, &common::meta()).unwrap();
    assert_eq!(att.fail_count, 1);
    assert_eq!(att.findings[0].code, "LAB.REQ.OPERATOR");
}

#[test]
fn test_evaluate_many_joins_identities_and_findings() {
    let tables = common::tables(&[
        ("samples.tsv", &defective_samples()),
        ("files.tsv", &common::files_for(&["S1", "S2"])),
    ]);
    let geo = presets::geo_seq_bulk().unwrap();
    let single = pipeline::evaluate(&tables, &geo, &common::meta()).unwrap();
    let both = pipeline::evaluate_many(&tables, &[geo, presets::generic()], &common::meta()).unwrap();

    assert_eq!(both.rulepack_id, "GEO-SEQ-BULK+GENERIC");
    assert_eq!(both.rulepack_version, "0.1.0+0.1.0");
    assert_eq!(both.findings, single.findings);
}

#[test]
fn test_file_metadata_fields_and_warning_cap() {
    let tables = common::tables(&[
        ("samples.tsv", &defective_samples()),
        ("files.tsv", &common::files_for(&["S1", "S2"])),
    ]);
    let packs = [presets::geo_seq_bulk().unwrap()];
    let evaluation = pipeline::run(&tables, &packs, &common::meta()).unwrap();
    assert!(evaluation
        .diagnostics
        .iter()
        .all(|d| d.severity != DiagnosticSeverity::Info));

    let files = pipeline::file_metadata(&tables, &packs, &evaluation.diagnostics, 100);
    let samples = files.iter().find(|f| f.name == "samples.tsv").unwrap();
    assert!(samples.fields_validated.contains(&"organism".to_string()));
    assert!(samples.fields_validated.contains(&"read_length".to_string()));
    assert!(samples.processed_at.is_none());
    assert!(!samples.warnings.is_empty());
    let files_meta = files.iter().find(|f| f.name == "files.tsv").unwrap();
    assert_eq!(files_meta.fields_validated, vec!["filename", "layout", "sample_id"]);

    let capped = pipeline::file_metadata(&tables, &packs, &evaluation.diagnostics, 1);
    let samples_capped = capped.iter().find(|f| f.name == "samples.tsv").unwrap();
    assert_eq!(samples_capped.warnings.len(), 1);
    assert_eq!(samples_capped.warnings[0], samples.warnings[0]);
}

#[test]
fn test_same_file_name_from_two_directories_is_rejected() {
    let dir = TempDir::new().unwrap();
    let batch_a = dir.path().join("batch_a");
    let batch_b = dir.path().join("batch_b");
    std::fs::create_dir(&batch_a).unwrap();
    std::fs::create_dir(&batch_b).unwrap();
    let mut paths = write_inputs(&batch_a, &[("samples.tsv", &common::good_samples())]);
    paths.extend(write_inputs(
        &batch_b,
        &[("samples.tsv", &defective_samples()), ("files.tsv", &common::good_files())],
    ));

    let out = dir.path().join("out");
    let err = pipeline::validate_submission(&paths, &out, &FairyConfig::default(), &common::meta())
        .unwrap_err();
    match &err {
        PipelineError::Table(TableError::DuplicateSource {
            source_name,
            first,
            second,
        }) => {
            assert_eq!(source_name, "samples.tsv");
            assert_eq!(first, &batch_a.join("samples.tsv"));
            assert_eq!(second, &batch_b.join("samples.tsv"));
        }
        other => panic!("expected DuplicateSource, got {other:?}"),
    }
    assert_eq!(err.error_code(), "TABLE_DUPLICATE_SOURCE");
    assert!(!out.exists());
}

#[test]
fn test_hand_built_config_is_validated() {
    let mut config = FairyConfig::default();
    config.validation.delimiter = Some("ab".to_string());
    let (dir, result) = submit(
        &[("samples.tsv", &common::good_samples()), ("files.tsv", &common::good_files())],
        &config,
    );

    let err = result.unwrap_err();
    assert!(matches!(err, PipelineError::Config(ConfigError::ValidationFailed { .. })));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
    assert!(!dir.path().join("out").exists());
}
