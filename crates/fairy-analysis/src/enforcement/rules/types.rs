//! Core types for rulepack rules.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use fairy_core::errors::RulepackError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::{Diagnostic, EngineSpec};
use crate::table::{Table, TableSet};

/// Finding severity. `Fail` sorts before `Warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FindingSeverity {
    Fail,
    Warn,
}

impl FindingSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "FAIL",
            Self::Warn => "WARN",
        }
    }
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A policy-level finding surfaced to the submitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable dotted code, e.g. `GEO.REQ.MISSING_FIELD`.
    pub code: String,
    pub severity: FindingSeverity,
    /// Human locator, e.g. `samples.tsv: row 3, column 'tissue'`.
    #[serde(rename = "where")]
    pub location: String,
    pub why: String,
    pub how_to_fix: String,
    #[serde(default)]
    pub details: BTreeMap<String, Value>,
}

impl Finding {
    /// Report ordering: `(severity FAIL<WARN, code, where)`.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        self.severity
            .cmp(&other.severity)
            .then_with(|| self.code.cmp(&other.code))
            .then_with(|| self.location.cmp(&other.location))
    }
}

/// True when `findings` is non-decreasing under [`Finding::sort_cmp`].
pub fn findings_sorted(findings: &[Finding]) -> bool {
    findings
        .windows(2)
        .all(|w| w[0].sort_cmp(&w[1]) != Ordering::Greater)
}

/// The human-facing text a rule stamps on every finding it emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingTemplate {
    pub code: String,
    pub why: String,
    pub how_to_fix: String,
}

impl FindingTemplate {
    pub fn new(code: &str, why: &str, how_to_fix: &str) -> Self {
        Self {
            code: code.to_string(),
            why: why.to_string(),
            how_to_fix: how_to_fix.to_string(),
        }
    }

    pub fn finding(
        &self,
        severity: FindingSeverity,
        location: String,
        details: BTreeMap<String, Value>,
    ) -> Finding {
        Finding {
            code: self.code.clone(),
            severity,
            location,
            why: self.why.clone(),
            how_to_fix: self.how_to_fix.clone(),
            details,
        }
    }

    /// One finding carrying a diagnostic's locator and details.
    pub fn from_diagnostic(&self, severity: FindingSeverity, diagnostic: &Diagnostic) -> Finding {
        let mut details = diagnostic.details.clone();
        details.insert("diagnostic".to_string(), Value::from(diagnostic.id.as_str()));
        details.insert("message".to_string(), Value::from(diagnostic.message.as_str()));
        details.insert("path".to_string(), Value::from(diagnostic.path.as_str()));
        self.finding(
            severity,
            locate(&diagnostic.table, diagnostic.row(), diagnostic.column()),
            details,
        )
    }
}

/// Everything a rule may look at.
pub struct RuleInput<'a> {
    /// Engine diagnostics, already in canonical order.
    pub diagnostics: &'a [Diagnostic],
    pub tables: &'a TableSet,
}

impl<'a> RuleInput<'a> {
    pub fn new(diagnostics: &'a [Diagnostic], tables: &'a TableSet) -> Self {
        Self {
            diagnostics,
            tables,
        }
    }

    /// Look up a table the rule cannot run without.
    pub fn table(&self, rule: &str, name: &str) -> Result<&'a Table, RulepackError> {
        self.tables.get(name).ok_or_else(|| RulepackError::MissingTable {
            rule: rule.to_string(),
            table: name.to_string(),
        })
    }

    /// Diagnostics raised on `table` whose id is in `ids`.
    /// Any table when `table` is `None`.
    pub fn diagnostics_for(&self, table: Option<&str>, ids: &[&str]) -> Vec<&'a Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| ids.contains(&d.id.as_str()) && table.map_or(true, |t| d.table == t))
            .collect()
    }
}

/// A policy rule: maps diagnostics and raw tables to findings.
///
/// Rules are pure; evaluation order is fixed by the owning rulepack.
pub trait Rule: Send + Sync {
    /// Stable finding code this rule emits.
    fn code(&self) -> &str;

    fn severity(&self) -> FindingSeverity;

    /// Diagnostic ids this rule maps; empty for table-level checks.
    fn consumes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Tables that must be present for the rule to run.
    fn tables(&self) -> Vec<&str>;

    /// `(table, column)` pairs the rule reads.
    fn fields(&self) -> Vec<(&str, &str)>;

    /// Contribute engine checks this rule depends on.
    fn requirements(&self, _spec: &mut EngineSpec) {}

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RulepackError>;
}

/// Human locator: `table: row N, column 'c'`, dropping absent parts.
pub fn locate(table: &str, row: Option<usize>, column: Option<&str>) -> String {
    let mut bits = Vec::with_capacity(2);
    if let Some(row) = row {
        bits.push(format!("row {row}"));
    }
    if let Some(column) = column {
        bits.push(format!("column '{column}'"));
    }
    if bits.is_empty() {
        table.to_string()
    } else {
        format!("{table}: {}", bits.join(", "))
    }
}
