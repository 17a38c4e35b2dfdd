//! Paired-end completeness.

use std::collections::BTreeMap;

use fairy_core::errors::RulepackError;
use regex::Regex;
use serde_json::json;

use super::types::*;

/// Column layout of a file manifest used by file-level checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingColumns {
    pub samples_key: String,
    pub layout_column: String,
    pub paired_value: String,
    pub file_column: String,
}

impl Default for PairingColumns {
    fn default() -> Self {
        Self {
            samples_key: "sample_id".to_string(),
            layout_column: "layout".to_string(),
            paired_value: "PAIRED".to_string(),
            file_column: "filename".to_string(),
        }
    }
}

/// For samples whose layout is the paired marker, requires at least one
/// file matching the R1 pattern and one matching the R2 pattern.
pub struct PairingRule {
    template: FindingTemplate,
    table: String,
    columns: PairingColumns,
    r1: Regex,
    r2: Regex,
}

impl PairingRule {
    pub fn new(
        template: FindingTemplate,
        table: &str,
        columns: PairingColumns,
        r1: Regex,
        r2: Regex,
    ) -> Self {
        Self {
            template,
            table: table.to_string(),
            columns,
            r1,
            r2,
        }
    }
}

#[derive(Default)]
struct Mates {
    r1: bool,
    r2: bool,
}

impl Rule for PairingRule {
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
        let t = self.table.as_str();
        vec![
            (t, self.columns.samples_key.as_str()),
            (t, self.columns.layout_column.as_str()),
            (t, self.columns.file_column.as_str()),
        ]
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RulepackError> {
        let table = input.table(self.code(), &self.table)?;
        let cols = &self.columns;

        let mut samples: BTreeMap<&str, Mates> = BTreeMap::new();
        for row in 0..table.n_rows() {
            let sample = table.value(row, &cols.samples_key);
            if sample.is_empty()
                || !table
                    .value(row, &cols.layout_column)
                    .eq_ignore_ascii_case(&cols.paired_value)
            {
                continue;
            }
            let file = table.value(row, &cols.file_column);
            let mates = samples.entry(sample).or_default();
            mates.r1 |= self.r1.is_match(file);
            mates.r2 |= self.r2.is_match(file);
        }

        let findings = samples
            .into_iter()
            .filter(|(_, m)| !(m.r1 && m.r2))
            .map(|(sample, m)| {
                let missing: Vec<&str> = [("R1", m.r1), ("R2", m.r2)]
                    .into_iter()
                    .filter(|(_, present)| !present)
                    .map(|(mate, _)| mate)
                    .collect();
                let mut details = BTreeMap::new();
                details.insert("sample_id".to_string(), json!(sample));
                details.insert("has_r1".to_string(), json!(m.r1));
                details.insert("has_r2".to_string(), json!(m.r2));
                details.insert("missing".to_string(), json!(missing));
                self.template.finding(
                    self.severity(),
                    format!("{}: {} '{sample}'", self.table, cols.samples_key),
                    details,
                )
            })
            .collect();
        Ok(findings)
    }
}
