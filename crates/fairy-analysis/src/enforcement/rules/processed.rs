//! Processed-data heuristic.

use std::collections::BTreeMap;

use fairy_core::errors::RulepackError;
use serde_json::json;

use super::types::*;

/// Flags samples that list raw reads but no processed output. Patterns are
/// plain substrings of the file name (e.g. `.fastq`, `.counts`).
pub struct ProcessedDataRule {
    template: FindingTemplate,
    table: String,
    samples_key: String,
    file_column: String,
    raw_pattern: String,
    processed_patterns: Vec<String>,
}

impl ProcessedDataRule {
    pub fn new(
        template: FindingTemplate,
        table: &str,
        samples_key: &str,
        file_column: &str,
        raw_pattern: &str,
        processed_patterns: Vec<String>,
    ) -> Self {
        Self {
            template,
            table: table.to_string(),
            samples_key: samples_key.to_string(),
            file_column: file_column.to_string(),
            raw_pattern: raw_pattern.to_string(),
            processed_patterns,
        }
    }
}

impl Rule for ProcessedDataRule {
    fn code(&self) -> &str {
        &self.template.code
    }

    fn severity(&self) -> FindingSeverity {
        FindingSeverity::Warn
    }

    fn tables(&self) -> Vec<&str> {
        vec![self.table.as_str()]
    }

    fn fields(&self) -> Vec<(&str, &str)> {
        vec![
            (self.table.as_str(), self.samples_key.as_str()),
            (self.table.as_str(), self.file_column.as_str()),
        ]
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RulepackError> {
        let table = input.table(self.code(), &self.table)?;

        // sample -> (has raw, has processed)
        let mut samples: BTreeMap<&str, (bool, bool)> = BTreeMap::new();
        for row in 0..table.n_rows() {
            let sample = table.value(row, &self.samples_key);
            if sample.is_empty() {
                continue;
            }
            let file = table.value(row, &self.file_column);
            let entry = samples.entry(sample).or_default();
            entry.0 |= file.contains(self.raw_pattern.as_str());
            entry.1 |= self
                .processed_patterns
                .iter()
                .any(|p| file.contains(p.as_str()));
        }

        let findings = samples
            .into_iter()
            .filter(|(_, (raw, processed))| *raw && !*processed)
            .map(|(sample, _)| {
                let mut details = BTreeMap::new();
                details.insert("sample_id".to_string(), json!(sample));
                details.insert("raw_pattern".to_string(), json!(self.raw_pattern));
                details.insert(
                    "processed_patterns".to_string(),
                    json!(self.processed_patterns),
                );
                self.template.finding(
                    self.severity(),
                    format!("{}: {} '{sample}'", self.table, self.samples_key),
                    details,
                )
            })
            .collect();
        Ok(findings)
    }
}
