//! DiagnosticEngine — runs every structural check over a table set.

use std::collections::BTreeMap;

use serde_json::json;

use super::spec::EngineSpec;
use super::types::*;
use crate::table::{Table, TableSet};

/// Runs the configured checks and returns diagnostics in canonical order.
pub struct DiagnosticEngine {
    spec: EngineSpec,
}

impl DiagnosticEngine {
    pub fn new(spec: EngineSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &EngineSpec {
        &self.spec
    }

    /// Check every table and return the diagnostics sorted by
    /// `(path, id, severity)`.
    pub fn run(&self, tables: &TableSet) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> =
            tables.iter().flat_map(|t| self.check_table(t)).collect();
        diagnostics.sort_by(|a, b| a.sort_cmp(b));

        tracing::debug!(
            tables = tables.len(),
            diagnostics = diagnostics.len(),
            "diagnostic engine complete"
        );
        diagnostics
    }

    /// All diagnostics for one table, in check order (unsorted).
    pub fn check_table(&self, table: &Table) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        self.check_required(table, &mut out);
        self.check_role_names(table, &mut out);
        check_normalized_clashes(table, &mut out);
        self.check_duplicate_keys(table, &mut out);
        self.check_minimums(table, &mut out);
        out
    }

    fn check_required(&self, table: &Table, out: &mut Vec<Diagnostic>) {
        for column in self.spec.required_for(&table.source) {
            if !table.has_column(column) {
                out.push(
                    Diagnostic::new(
                        COLUMN_MISSING_REQUIRED,
                        DiagnosticSeverity::Error,
                        &table.source,
                        column_path(column),
                        format!("Required column '{column}' is missing."),
                    )
                    .with_detail("column", column),
                );
                continue;
            }
            for (row, value) in table.column_values(column) {
                if value.is_empty() {
                    out.push(
                        Diagnostic::new(
                            CELL_EMPTY_REQUIRED,
                            DiagnosticSeverity::Error,
                            &table.source,
                            cell_path(row, column),
                            format!("Missing value in required field '{column}'."),
                        )
                        .with_detail("column", column)
                        .with_detail("row", row),
                    );
                }
            }
        }
    }

    fn check_role_names(&self, table: &Table, out: &mut Vec<Diagnostic>) {
        for column in &table.columns {
            let key = role_key(column);
            for role in &self.spec.semantic_roles {
                if column != role && !key.is_empty() && key == role_key(role) {
                    out.push(
                        Diagnostic::new(
                            COLUMN_NAME_MISMATCH,
                            DiagnosticSeverity::Warn,
                            &table.source,
                            column_path(column),
                            format!("Column '{column}' looks like '{role}' but is named differently."),
                        )
                        .with_detail("expected", role.as_str())
                        .with_detail("found", column.as_str()),
                    );
                }
            }
        }
    }

    fn check_duplicate_keys(&self, table: &Table, out: &mut Vec<Diagnostic>) {
        for column in self.spec.keys_for(&table.source) {
            let mut first_seen: BTreeMap<String, usize> = BTreeMap::new();
            for (row, value) in table.column_values(column) {
                if value.is_empty() {
                    continue;
                }
                match first_seen.get(&value.to_lowercase()) {
                    Some(&first_row) => out.push(
                        Diagnostic::new(
                            ROW_DUPLICATE_KEY,
                            DiagnosticSeverity::Warn,
                            &table.source,
                            cell_path(row, column),
                            format!("Duplicate {column} value '{value}'."),
                        )
                        .with_detail("column", column)
                        .with_detail("value", value)
                        .with_detail("first_row", first_row),
                    ),
                    None => {
                        first_seen.insert(value.to_lowercase(), row);
                    }
                }
            }
        }
    }

    fn check_minimums(&self, table: &Table, out: &mut Vec<Diagnostic>) {
        for (column, minimum) in self.spec.minimums_for(&table.source) {
            for (row, value) in table.column_values(column) {
                if value.is_empty() {
                    continue;
                }
                let ok = value
                    .parse::<f64>()
                    .map(|n| n.is_finite() && n >= minimum)
                    .unwrap_or(false);
                if !ok {
                    out.push(
                        Diagnostic::new(
                            CELL_BELOW_MINIMUM,
                            DiagnosticSeverity::Warn,
                            &table.source,
                            cell_path(row, column),
                            format!("Value '{value}' in '{column}' is not a number >= {minimum}."),
                        )
                        .with_detail("column", column)
                        .with_detail("value", value)
                        .with_detail("minimum", json!(minimum)),
                    );
                }
            }
        }
    }
}

fn check_normalized_clashes(table: &Table, out: &mut Vec<Diagnostic>) {
    let mut first_seen: BTreeMap<String, &str> = BTreeMap::new();
    for column in &table.columns {
        let key = normalize_header(column);
        if key.is_empty() {
            continue;
        }
        match first_seen.get(&key) {
            Some(first) => out.push(
                Diagnostic::new(
                    COLUMN_DUPLICATE_NORMALIZED,
                    DiagnosticSeverity::Warn,
                    &table.source,
                    column_path(column),
                    format!("Columns '{first}' and '{column}' appear to represent the same field (normalized '{key}')."),
                )
                .with_detail("normalized", key.as_str())
                .with_detail("first", *first)
                .with_detail("found", column.as_str()),
            ),
            None => {
                first_seen.insert(key, column);
            }
        }
    }
}

/// Header key for clash detection: trimmed, lower-cased, runs of
/// non-alphanumerics collapsed to `_`, outer `_` stripped.
pub fn normalize_header(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Key for semantic-role matching: lower-case ASCII alphanumerics only.
pub fn role_key(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_header_collapses_separators() {
        assert_eq!(normalize_header("  Sample ID "), "sample_id");
        assert_eq!(normalize_header("sample--id"), "sample_id");
        assert_eq!(normalize_header("_x_"), "x");
        assert_eq!(normalize_header("SampleID"), "sampleid");
        assert_eq!(normalize_header("***"), "");
    }

    #[test]
    fn role_key_ignores_case_and_punctuation() {
        assert_eq!(role_key("SampleID"), role_key("sample_id"));
        assert_eq!(role_key("Cell-Type"), "celltype");
    }
}
