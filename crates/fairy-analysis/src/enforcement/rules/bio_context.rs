//! Biological context: each row needs at least one populated field per group.

use std::collections::BTreeMap;

use fairy_core::errors::RulepackError;
use serde_json::json;

use super::types::*;

/// Per-row check with no engine precursor. A row fails a group when every
/// column of the group is empty or absent from the header.
pub struct BioContextRule {
    template: FindingTemplate,
    table: String,
    column_groups: Vec<Vec<String>>,
}

impl BioContextRule {
    pub fn new(template: FindingTemplate, table: &str, column_groups: Vec<Vec<String>>) -> Self {
        Self {
            template,
            table: table.to_string(),
            column_groups,
        }
    }
}

impl Rule for BioContextRule {
    fn code(&self) -> &str {
        &self.template.code
    }

    fn severity(&self) -> FindingSeverity {
        FindingSeverity::Fail
    }

    fn tables(&self) -> Vec<&str> {
        vec![self.table.as_str()]
    }

    fn fields(&self) -> Vec<(&str, &str)> {
        self.column_groups
            .iter()
            .flatten()
            .map(|c| (self.table.as_str(), c.as_str()))
            .collect()
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RulepackError> {
        let table = input.table(self.code(), &self.table)?;
        let mut findings = Vec::new();

        for row in 0..table.n_rows() {
            for group in &self.column_groups {
                if group.is_empty() || group.iter().any(|c| !table.value(row, c).is_empty()) {
                    continue;
                }
                let mut details = BTreeMap::new();
                details.insert("row".to_string(), json!(row));
                details.insert("columns".to_string(), json!(group));
                findings.push(self.template.finding(
                    self.severity(),
                    locate(&self.table, Some(row), None),
                    details,
                ));
            }
        }
        Ok(findings)
    }
}
