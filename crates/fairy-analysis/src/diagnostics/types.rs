//! Core types for engine diagnostics.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const COLUMN_MISSING_REQUIRED: &str = "column.missing_required";
pub const CELL_EMPTY_REQUIRED: &str = "cell.empty_required";
pub const COLUMN_NAME_MISMATCH: &str = "column.name_mismatch";
pub const ROW_DUPLICATE_KEY: &str = "row.duplicate_key";
pub const COLUMN_DUPLICATE_NORMALIZED: &str = "column.duplicate_normalized";
pub const CELL_BELOW_MINIMUM: &str = "cell.below_minimum";

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Info,
    Warn,
    Error,
}

impl DiagnosticSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A low-level observation about one table's structure or content.
///
/// `path` is one of `columns/<name>`, `rows/<index>`, or
/// `rows/<index>/columns/<name>`, with 0-based row indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: String,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub path: String,
    /// Source name of the table the diagnostic was raised on.
    pub table: String,
    #[serde(default)]
    pub details: BTreeMap<String, Value>,
}

impl Diagnostic {
    pub fn new(
        id: &str,
        severity: DiagnosticSeverity,
        table: &str,
        path: String,
        message: String,
    ) -> Self {
        Self {
            id: id.to_string(),
            severity,
            message,
            path,
            table: table.to_string(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    /// Column named by the path, if any.
    pub fn column(&self) -> Option<&str> {
        if let Some(name) = self.path.strip_prefix("columns/") {
            return Some(name);
        }
        let rest = self.path.strip_prefix("rows/")?;
        let (_, tail) = rest.split_once('/')?;
        tail.strip_prefix("columns/")
    }

    /// 0-based row index named by the path, if any.
    pub fn row(&self) -> Option<usize> {
        let rest = self.path.strip_prefix("rows/")?;
        let index = rest.split_once('/').map_or(rest, |(index, _)| index);
        index.parse().ok()
    }

    /// Ordering key: `(path, id, severity)` by ordinal comparison, then the
    /// table name so diagnostics from different tables never tie.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        self.path
            .cmp(&other.path)
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.severity.as_str().cmp(other.severity.as_str()))
            .then_with(|| self.table.cmp(&other.table))
    }
}

pub fn column_path(column: &str) -> String {
    format!("columns/{column}")
}

pub fn row_path(row: usize) -> String {
    format!("rows/{row}")
}

pub fn cell_path(row: usize, column: &str) -> String {
    format!("rows/{row}/columns/{column}")
}

/// True when `diagnostics` is non-decreasing under [`Diagnostic::sort_cmp`].
pub fn is_sorted(diagnostics: &[Diagnostic]) -> bool {
    diagnostics
        .windows(2)
        .all(|w| w[0].sort_cmp(&w[1]) != Ordering::Greater)
}
