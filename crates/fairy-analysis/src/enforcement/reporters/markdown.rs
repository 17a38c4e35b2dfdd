//! Markdown reporter — human-readable run summary.

use std::fmt::Write as _;

use fairy_core::errors::ReportError;

use super::types::ReportDocument;
use super::Reporter;

pub struct MarkdownReporter;

impl Reporter for MarkdownReporter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn generate(&self, report: &ReportDocument) -> Result<String, ReportError> {
        let mut out = String::new();
        render(&mut out, report).map_err(|e| ReportError::Serialization {
            message: e.to_string(),
        })?;
        Ok(out)
    }
}

fn render(out: &mut String, report: &ReportDocument) -> std::fmt::Result {
    writeln!(out, "# FAIRy preflight report")?;
    writeln!(out)?;
    writeln!(
        out,
        "- Rulepack: `{}` {}",
        report.rulepack_id, report.rulepack_version
    )?;
    writeln!(out, "- FAIRy version: {}", report.fairy_version)?;
    writeln!(out, "- Run at (UTC): {}", report.run_at_utc)?;
    writeln!(
        out,
        "- Submission ready: **{}**",
        if report.submission_ready { "yes" } else { "no" }
    )?;
    writeln!(out, "- FAIL: {}", report.fail_count)?;
    writeln!(out, "- WARN: {}", report.warn_count)?;
    writeln!(out)?;

    writeln!(out, "## Findings")?;
    writeln!(out)?;
    if report.findings.is_empty() {
        writeln!(out, "No findings.")?;
    } else {
        writeln!(out, "| Severity | Code | Where | Why | How to fix |")?;
        writeln!(out, "|---|---|---|---|---|")?;
        for f in &report.findings {
            writeln!(
                out,
                "| {} | `{}` | {} | {} | {} |",
                f.severity,
                f.code,
                cell(&f.location),
                cell(&f.why),
                cell(&f.how_to_fix)
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Files")?;
    writeln!(out)?;
    if report.files.is_empty() {
        writeln!(out, "No files.")?;
    } else {
        writeln!(out, "| File | Rows | Columns | Bytes | Warnings | SHA-256 |")?;
        writeln!(out, "|---|---|---|---|---|---|")?;
        for file in &report.files {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | `{}` |",
                cell(&file.name),
                file.n_rows,
                file.n_cols,
                file.bytes,
                file.warnings.len(),
                file.sha256
            )?;
        }
    }
    Ok(())
}

/// Escape a value for a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}
