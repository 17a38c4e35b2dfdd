//! Required fields: one finding per field that is absent or has empty cells.

use std::collections::BTreeMap;

use fairy_core::errors::RulepackError;
use serde_json::{json, Value};

use super::types::*;
use crate::diagnostics::{EngineSpec, CELL_EMPTY_REQUIRED, COLUMN_MISSING_REQUIRED};

/// Maps `column.missing_required` and `cell.empty_required` diagnostics
/// for a fixed field set onto one finding per field.
///
/// All diagnostics for the same field collapse into one finding whose
/// details list every empty row, so the finding count depends only on
/// which fields are defective.
pub struct MissingFieldRule {
    template: FindingTemplate,
    table: String,
    fields: Vec<String>,
}

impl MissingFieldRule {
    pub fn new(template: FindingTemplate, table: &str, fields: Vec<String>) -> Self {
        Self {
            template,
            table: table.to_string(),
            fields,
        }
    }
}

#[derive(Default)]
struct FieldDefect {
    missing_column: bool,
    empty_rows: Vec<usize>,
}

impl Rule for MissingFieldRule {
    fn code(&self) -> &str {
        &self.template.code
    }

    fn severity(&self) -> FindingSeverity {
        FindingSeverity::Fail
    }

    fn consumes(&self) -> &'static [&'static str] {
        &[COLUMN_MISSING_REQUIRED, CELL_EMPTY_REQUIRED]
    }

    fn tables(&self) -> Vec<&str> {
        vec![self.table.as_str()]
    }

    fn fields(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|f| (self.table.as_str(), f.as_str()))
            .collect()
    }

    fn requirements(&self, spec: &mut EngineSpec) {
        for field in &self.fields {
            spec.require(Some(self.table.as_str()), field);
        }
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RulepackError> {
        input.table(self.code(), &self.table)?;

        let mut defects: BTreeMap<&str, FieldDefect> = BTreeMap::new();
        for diagnostic in input.diagnostics_for(Some(self.table.as_str()), self.consumes()) {
            let Some(column) = diagnostic.column() else {
                continue;
            };
            let Some(field) = self.fields.iter().find(|f| f.as_str() == column) else {
                continue;
            };
            let defect = defects.entry(field.as_str()).or_default();
            match diagnostic.row() {
                Some(row) => defect.empty_rows.push(row),
                None => defect.missing_column = true,
            }
        }

        let findings = defects
            .into_iter()
            .map(|(field, mut defect)| {
                defect.empty_rows.sort_unstable();
                let mut details: BTreeMap<String, Value> = BTreeMap::new();
                details.insert("field".into(), json!(field));
                details.insert("table".into(), json!(self.table));
                details.insert("missing_column".into(), json!(defect.missing_column));
                details.insert("empty_rows".into(), json!(defect.empty_rows));
                self.template.finding(
                    self.severity(),
                    locate(&self.table, None, Some(field)),
                    details,
                )
            })
            .collect();
        Ok(findings)
    }
}
