//! Cross-file sample id join.

use std::collections::{BTreeMap, BTreeSet};

use fairy_core::errors::RulepackError;
use serde_json::json;

use super::types::*;
use crate::diagnostics::EngineSpec;
use crate::table::Table;

/// Emits one finding per id in the symmetric difference of the key sets
/// of two tables, in ascending id order. A table without its key column
/// contributes no ids.
pub struct UnmatchedSampleRule {
    template: FindingTemplate,
    left_table: String,
    right_table: String,
    left_key: String,
    right_key: String,
}

impl UnmatchedSampleRule {
    pub fn new(
        template: FindingTemplate,
        left_table: &str,
        right_table: &str,
        left_key: &str,
        right_key: &str,
    ) -> Self {
        Self {
            template,
            left_table: left_table.to_string(),
            right_table: right_table.to_string(),
            left_key: left_key.to_string(),
            right_key: right_key.to_string(),
        }
    }
}

fn id_set<'t>(table: &'t Table, key: &str) -> BTreeSet<&'t str> {
    table
        .column_values(key)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
        .collect()
}

impl Rule for UnmatchedSampleRule {
    fn code(&self) -> &str {
        &self.template.code
    }

    fn severity(&self) -> FindingSeverity {
        FindingSeverity::Fail
    }

    fn tables(&self) -> Vec<&str> {
        vec![self.left_table.as_str(), self.right_table.as_str()]
    }

    fn fields(&self) -> Vec<(&str, &str)> {
        vec![
            (self.left_table.as_str(), self.left_key.as_str()),
            (self.right_table.as_str(), self.right_key.as_str()),
        ]
    }

    fn requirements(&self, spec: &mut EngineSpec) {
        spec.add_role(&self.left_key);
        spec.add_role(&self.right_key);
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RulepackError> {
        let left = input.table(self.code(), &self.left_table)?;
        let right = input.table(self.code(), &self.right_table)?;

        // An absent key column reads as an empty id set, so every id on the
        // other side is unmatched.
        for (table, key) in [(left, &self.left_key), (right, &self.right_key)] {
            if !table.has_column(key) {
                tracing::warn!(
                    rule = %self.template.code,
                    table = %table.source,
                    key = %key,
                    "id key column absent"
                );
            }
        }

        let left_ids = id_set(left, &self.left_key);
        let right_ids = id_set(right, &self.right_key);

        let findings = left_ids
            .symmetric_difference(&right_ids)
            .map(|id| {
                let (present_in, missing_from, key) = if left_ids.contains(id) {
                    (&self.left_table, &self.right_table, &self.right_key)
                } else {
                    (&self.right_table, &self.left_table, &self.left_key)
                };
                let mut details = BTreeMap::new();
                details.insert("sample_id".to_string(), json!(id));
                details.insert("present_in".to_string(), json!(present_in));
                details.insert("missing_from".to_string(), json!(missing_from));
                self.template.finding(
                    self.severity(),
                    format!("{missing_from}: {key} '{id}'"),
                    details,
                )
            })
            .collect();
        Ok(findings)
    }
}
