//! JSON rulepack definitions.
//!
//! ```json
//! { "rulepack_id": "GEO-SEQ-BULK", "rulepack_version": "0.1.0",
//!   "rules": [ { "code": "...", "why": "...", "how_to_fix": "...",
//!                "check": { "type": "require_columns", ... } } ] }
//! ```
//!
//! Unknown keys are ignored; unknown check types are rejected.

use std::path::Path;

use fairy_core::errors::RulepackError;
use regex::Regex;
use serde::Deserialize;

use super::types::Rulepack;
use crate::enforcement::rules::*;

const SAMPLES_TABLE: &str = "samples.tsv";
const FILES_TABLE: &str = "files.tsv";

fn samples_table() -> String {
    SAMPLES_TABLE.to_string()
}
fn files_table() -> String {
    FILES_TABLE.to_string()
}
fn sample_id() -> String {
    "sample_id".to_string()
}
fn layout() -> String {
    "layout".to_string()
}
fn paired() -> String {
    "PAIRED".to_string()
}
fn filename() -> String {
    "filename".to_string()
}
fn r1_pattern() -> String {
    "_R1".to_string()
}
fn r2_pattern() -> String {
    "_R2".to_string()
}
fn raw_glob() -> String {
    ".fastq".to_string()
}
fn processed_globs() -> Vec<String> {
    [".counts", ".quant", ".gene_counts"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn sample_roles() -> Vec<String> {
    vec![sample_id()]
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RulepackDefinition {
    pub rulepack_id: String,
    pub rulepack_version: String,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleDefinition {
    pub code: String,
    pub why: String,
    pub how_to_fix: String,
    pub check: CheckDefinition,
}

/// The check a rule performs, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckDefinition {
    RequireColumns {
        #[serde(default = "samples_table")]
        table: String,
        required_columns: Vec<String>,
    },
    AtLeastOneNonemptyPerRow {
        #[serde(default = "samples_table")]
        table: String,
        column_groups: Vec<Vec<String>>,
    },
    IdCrosscheck {
        #[serde(default = "samples_table")]
        left_table: String,
        #[serde(default = "files_table")]
        right_table: String,
        #[serde(default = "sample_id")]
        left_key: String,
        /// Defaults to `left_key`.
        #[serde(default)]
        right_key: Option<String>,
    },
    PairedEndComplete {
        #[serde(default = "files_table")]
        table: String,
        #[serde(default = "sample_id")]
        samples_key: String,
        #[serde(default = "layout")]
        layout_column: String,
        #[serde(default = "paired")]
        layout_value_for_paired: String,
        #[serde(default = "filename")]
        file_column: String,
        #[serde(default = "r1_pattern")]
        r1_pattern: String,
        #[serde(default = "r2_pattern")]
        r2_pattern: String,
    },
    DatesAreIso8601 {
        #[serde(default = "samples_table")]
        table: String,
        columns: Vec<String>,
    },
    ProcessedDataPresent {
        #[serde(default = "files_table")]
        table: String,
        #[serde(default = "sample_id")]
        samples_key: String,
        #[serde(default = "filename")]
        file_column: String,
        #[serde(default = "raw_glob")]
        raw_file_glob: String,
        #[serde(default = "processed_globs")]
        processed_glob_candidates: Vec<String>,
    },
    UniqueKey {
        #[serde(default = "samples_table")]
        table: String,
        #[serde(default = "sample_id")]
        column: String,
    },
    ColumnNames {
        #[serde(default = "sample_roles")]
        roles: Vec<String>,
    },
    NumericMinimum {
        #[serde(default = "samples_table")]
        table: String,
        column: String,
        minimum: f64,
    },
}

impl RulepackDefinition {
    pub fn from_json(json: &str) -> Result<Self, RulepackError> {
        serde_json::from_str(json).map_err(|e| RulepackError::InvalidDefinition {
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, RulepackError> {
        let content = std::fs::read_to_string(path).map_err(|source| RulepackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Validate and compile into an executable rulepack.
    pub fn into_rulepack(self) -> Result<Rulepack, RulepackError> {
        if self.rulepack_id.trim().is_empty() || self.rulepack_version.trim().is_empty() {
            return Err(invalid("rulepack_id and rulepack_version must be non-empty"));
        }

        let mut pack = Rulepack::new(&self.rulepack_id, &self.rulepack_version);
        for rule in self.rules {
            if !is_finding_code(&rule.code) {
                return Err(invalid(&format!(
                    "rule code {:?} must be dotted upper-case, e.g. GEO.REQ.MISSING_FIELD",
                    rule.code
                )));
            }
            let template = FindingTemplate::new(&rule.code, &rule.why, &rule.how_to_fix);
            pack.push(build_rule(template, rule.check)?);
        }

        tracing::debug!(
            rulepack = %pack.id(),
            version = %pack.version(),
            rules = pack.len(),
            "rulepack compiled"
        );
        Ok(pack)
    }
}

impl Rulepack {
    /// Parse and compile a JSON definition.
    pub fn from_json(json: &str) -> Result<Self, RulepackError> {
        RulepackDefinition::from_json(json)?.into_rulepack()
    }

    /// Load and compile a JSON definition from disk.
    pub fn load(path: &Path) -> Result<Self, RulepackError> {
        RulepackDefinition::load(path)?.into_rulepack()
    }
}

fn build_rule(
    template: FindingTemplate,
    check: CheckDefinition,
) -> Result<Box<dyn Rule>, RulepackError> {
    let code = template.code.clone();
    let rule: Box<dyn Rule> = match check {
        CheckDefinition::RequireColumns {
            table,
            required_columns,
        } => {
            non_empty(&code, "required_columns", required_columns.len())?;
            Box::new(MissingFieldRule::new(template, &table, required_columns))
        }
        CheckDefinition::AtLeastOneNonemptyPerRow {
            table,
            column_groups,
        } => {
            non_empty(&code, "column_groups", column_groups.len())?;
            if column_groups.iter().any(Vec::is_empty) {
                return Err(invalid(&format!("{code}: column groups must be non-empty")));
            }
            Box::new(BioContextRule::new(template, &table, column_groups))
        }
        CheckDefinition::IdCrosscheck {
            left_table,
            right_table,
            left_key,
            right_key,
        } => {
            let right_key = right_key.unwrap_or_else(|| left_key.clone());
            Box::new(UnmatchedSampleRule::new(
                template,
                &left_table,
                &right_table,
                &left_key,
                &right_key,
            ))
        }
        CheckDefinition::PairedEndComplete {
            table,
            samples_key,
            layout_column,
            layout_value_for_paired,
            file_column,
            r1_pattern,
            r2_pattern,
        } => Box::new(PairingRule::new(
            template,
            &table,
            PairingColumns {
                samples_key,
                layout_column,
                paired_value: layout_value_for_paired,
                file_column,
            },
            compile(&r1_pattern)?,
            compile(&r2_pattern)?,
        )),
        CheckDefinition::DatesAreIso8601 { table, columns } => {
            non_empty(&code, "columns", columns.len())?;
            Box::new(IsoDateRule::new(template, &table, columns))
        }
        CheckDefinition::ProcessedDataPresent {
            table,
            samples_key,
            file_column,
            raw_file_glob,
            processed_glob_candidates,
        } => {
            non_empty(&code, "processed_glob_candidates", processed_glob_candidates.len())?;
            Box::new(ProcessedDataRule::new(
                template,
                &table,
                &samples_key,
                &file_column,
                &raw_file_glob,
                processed_glob_candidates,
            ))
        }
        CheckDefinition::UniqueKey { table, column } => {
            Box::new(DuplicateSampleRule::new(template, &table, &column))
        }
        CheckDefinition::ColumnNames { roles } => {
            non_empty(&code, "roles", roles.len())?;
            Box::new(ColumnNamesRule::new(template, roles))
        }
        CheckDefinition::NumericMinimum {
            table,
            column,
            minimum,
        } => {
            if !minimum.is_finite() {
                return Err(invalid(&format!("{code}: minimum must be finite")));
            }
            Box::new(BelowMinimumRule::new(template, &table, &column, minimum))
        }
    };
    Ok(rule)
}

/// `NAMESPACE.PART[.PART...]` of `A-Z`, `0-9`, `_`.
fn is_finding_code(code: &str) -> bool {
    let parts: Vec<&str> = code.split('.').collect();
    parts.len() >= 2
        && parts.iter().all(|p| {
            !p.is_empty()
                && p.bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
        })
}

fn compile(pattern: &str) -> Result<Regex, RulepackError> {
    Regex::new(pattern).map_err(|e| RulepackError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn non_empty(code: &str, field: &str, len: usize) -> Result<(), RulepackError> {
    if len == 0 {
        return Err(invalid(&format!("{code}: {field} must not be empty")));
    }
    Ok(())
}

fn invalid(message: &str) -> RulepackError {
    RulepackError::InvalidDefinition {
        message: message.to_string(),
    }
}
