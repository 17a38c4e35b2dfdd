//! Rules that map one engine diagnostic to one finding.

use fairy_core::errors::RulepackError;
use serde_json::{json, Value};

use super::types::*;
use crate::diagnostics::{
    Diagnostic, EngineSpec, CELL_BELOW_MINIMUM, COLUMN_DUPLICATE_NORMALIZED, COLUMN_NAME_MISMATCH,
    ROW_DUPLICATE_KEY,
};

/// Duplicate values in a table's key column.
pub struct DuplicateSampleRule {
    template: FindingTemplate,
    table: String,
    column: String,
}

impl DuplicateSampleRule {
    pub fn new(template: FindingTemplate, table: &str, column: &str) -> Self {
        Self {
            template,
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

impl Rule for DuplicateSampleRule {
    fn code(&self) -> &str {
        &self.template.code
    }

    fn severity(&self) -> FindingSeverity {
        FindingSeverity::Warn
    }

    fn consumes(&self) -> &'static [&'static str] {
        &[ROW_DUPLICATE_KEY]
    }

    fn tables(&self) -> Vec<&str> {
        vec![self.table.as_str()]
    }

    fn fields(&self) -> Vec<(&str, &str)> {
        vec![(self.table.as_str(), self.column.as_str())]
    }

    fn requirements(&self, spec: &mut EngineSpec) {
        spec.add_key(&self.table, &self.column);
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RulepackError> {
        input.table(self.code(), &self.table)?;
        Ok(input
            .diagnostics_for(Some(self.table.as_str()), self.consumes())
            .into_iter()
            .filter(|d| d.column() == Some(self.column.as_str()))
            .map(|d| self.template.from_diagnostic(self.severity(), d))
            .collect())
    }
}

/// Header names that deviate from a canonical role, or that clash after
/// normalization. Applies to every table.
pub struct ColumnNamesRule {
    template: FindingTemplate,
    roles: Vec<String>,
}

impl ColumnNamesRule {
    pub fn new(template: FindingTemplate, roles: Vec<String>) -> Self {
        Self { template, roles }
    }
}

impl Rule for ColumnNamesRule {
    fn code(&self) -> &str {
        &self.template.code
    }

    fn severity(&self) -> FindingSeverity {
        FindingSeverity::Warn
    }

    fn consumes(&self) -> &'static [&'static str] {
        &[COLUMN_NAME_MISMATCH, COLUMN_DUPLICATE_NORMALIZED]
    }

    fn tables(&self) -> Vec<&str> {
        Vec::new()
    }

    fn fields(&self) -> Vec<(&str, &str)> {
        Vec::new()
    }

    fn requirements(&self, spec: &mut EngineSpec) {
        for role in &self.roles {
            spec.add_role(role);
        }
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RulepackError> {
        Ok(input
            .diagnostics_for(None, self.consumes())
            .into_iter()
            .map(|d| self.template.from_diagnostic(self.severity(), d))
            .collect())
    }
}

/// Numeric cells under a configured minimum, or not numeric at all.
pub struct BelowMinimumRule {
    template: FindingTemplate,
    table: String,
    column: String,
    minimum: f64,
}

impl BelowMinimumRule {
    pub fn new(template: FindingTemplate, table: &str, column: &str, minimum: f64) -> Self {
        Self {
            template,
            table: table.to_string(),
            column: column.to_string(),
            minimum,
        }
    }
}

impl Rule for BelowMinimumRule {
    fn code(&self) -> &str {
        &self.template.code
    }

    fn severity(&self) -> FindingSeverity {
        FindingSeverity::Warn
    }

    fn consumes(&self) -> &'static [&'static str] {
        &[CELL_BELOW_MINIMUM]
    }

    fn tables(&self) -> Vec<&str> {
        vec![self.table.as_str()]
    }

    fn fields(&self) -> Vec<(&str, &str)> {
        vec![(self.table.as_str(), self.column.as_str())]
    }

    fn requirements(&self, spec: &mut EngineSpec) {
        spec.add_minimum(&self.table, &self.column, self.minimum);
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RulepackError> {
        input.table(self.code(), &self.table)?;
        Ok(input
            .diagnostics_for(Some(self.table.as_str()), self.consumes())
            .into_iter()
            .filter(|d| d.column() == Some(self.column.as_str()))
            .filter(|d| self.violates(d))
            .map(|d| {
                let mut finding = self.template.from_diagnostic(self.severity(), d);
                finding
                    .details
                    .insert("minimum".to_string(), json!(self.minimum));
                finding
            })
            .collect())
    }
}

impl BelowMinimumRule {
    /// The engine flags cells against the strictest bound on the column;
    /// keep only those that also fail this rule's own bound.
    fn violates(&self, diagnostic: &Diagnostic) -> bool {
        diagnostic
            .details
            .get("value")
            .and_then(Value::as_str)
            .and_then(|v| v.parse::<f64>().ok())
            .map_or(true, |n| !n.is_finite() || n < self.minimum)
    }
}
