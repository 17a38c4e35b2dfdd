//! ISO-8601 date columns.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use fairy_core::errors::RulepackError;
use serde_json::json;

use super::types::*;

/// One finding per non-empty cell in a date column that is not a strict
/// ISO-8601 calendar date or date-time.
pub struct IsoDateRule {
    template: FindingTemplate,
    table: String,
    columns: Vec<String>,
}

impl IsoDateRule {
    pub fn new(template: FindingTemplate, table: &str, columns: Vec<String>) -> Self {
        Self {
            template,
            table: table.to_string(),
            columns,
        }
    }
}

impl Rule for IsoDateRule {
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
        self.columns
            .iter()
            .map(|c| (self.table.as_str(), c.as_str()))
            .collect()
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RulepackError> {
        let table = input.table(self.code(), &self.table)?;
        let mut findings = Vec::new();

        for column in &self.columns {
            for (row, value) in table.column_values(column) {
                if value.is_empty() || is_iso8601(value) {
                    continue;
                }
                let mut details = BTreeMap::new();
                details.insert("row".to_string(), json!(row));
                details.insert("column".to_string(), json!(column));
                details.insert("value".to_string(), json!(value));
                findings.push(self.template.finding(
                    self.severity(),
                    locate(&self.table, Some(row), Some(column)),
                    details,
                ));
            }
        }
        Ok(findings)
    }
}

/// `YYYY-MM-DD`, RFC 3339, or a zone-less `YYYY-MM-DDTHH:MM:SS[.f]`.
pub fn is_iso8601(value: &str) -> bool {
    if value.len() < 10 || !has_date_prefix(&value.as_bytes()[..10]) {
        return false;
    }
    if value.len() == 10 {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    }
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}

fn has_date_prefix(b: &[u8]) -> bool {
    b.iter().enumerate().all(|(i, c)| match i {
        4 | 7 => *c == b'-',
        _ => c.is_ascii_digit(),
    })
}
