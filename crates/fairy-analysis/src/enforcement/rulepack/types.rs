//! Rulepack — a named, versioned, ordered bundle of rules.

use std::collections::BTreeSet;

use fairy_core::errors::RulepackError;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, EngineSpec};
use crate::enforcement::rules::{Finding, Rule, RuleInput};
use crate::table::TableSet;

/// Identity of a rulepack as recorded in the attestation header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulepackIdentity {
    pub id: String,
    pub version: String,
}

pub struct Rulepack {
    id: String,
    version: String,
    rules: Vec<Box<dyn Rule>>,
}

impl Rulepack {
    pub fn new(id: &str, version: &str) -> Self {
        Self {
            id: id.to_string(),
            version: version.to_string(),
            rules: Vec::new(),
        }
    }

    /// Append a rule; rules run in insertion order.
    pub fn push(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.push(Box::new(rule));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn identity(&self) -> RulepackIdentity {
        RulepackIdentity {
            id: self.id.clone(),
            version: self.version.clone(),
        }
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Engine checks needed by all rules.
    pub fn engine_spec(&self) -> EngineSpec {
        let mut spec = EngineSpec::new();
        for rule in &self.rules {
            rule.requirements(&mut spec);
        }
        spec
    }

    /// Tables the rulepack cannot run without.
    pub fn required_tables(&self) -> BTreeSet<&str> {
        self.rules.iter().flat_map(|r| r.tables()).collect()
    }

    /// Columns of `table` that any rule reads.
    pub fn fields_for(&self, table: &str) -> BTreeSet<&str> {
        self.rules
            .iter()
            .flat_map(|r| r.fields())
            .filter(|(t, _)| *t == table)
            .map(|(_, c)| c)
            .collect()
    }

    /// Run every rule in order and concatenate their findings.
    ///
    /// Fails before running any rule if a required table is absent.
    pub fn evaluate(
        &self,
        diagnostics: &[Diagnostic],
        tables: &TableSet,
    ) -> Result<Vec<Finding>, RulepackError> {
        for rule in &self.rules {
            if let Some(missing) = rule.tables().into_iter().find(|t| !tables.contains(t)) {
                return Err(RulepackError::MissingTable {
                    rule: rule.code().to_string(),
                    table: missing.to_string(),
                });
            }
        }

        let input = RuleInput::new(diagnostics, tables);
        let mut findings = Vec::new();
        for rule in &self.rules {
            let produced = rule.evaluate(&input)?;
            tracing::debug!(
                rulepack = %self.id,
                code = rule.code(),
                findings = produced.len(),
                "rule evaluated"
            );
            findings.extend(produced);
        }
        Ok(findings)
    }
}

impl std::fmt::Debug for Rulepack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rulepack")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("rules", &self.rules.iter().map(|r| r.code()).collect::<Vec<_>>())
            .finish()
    }
}
