//! What the diagnostic engine checks for.

use std::collections::{BTreeMap, BTreeSet};

/// Checks the diagnostic engine runs, per table.
///
/// Rulepacks build one of these from their rules; it can also be
/// assembled by hand for engine-only runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineSpec {
    /// Columns required in every table.
    pub required_columns: BTreeSet<String>,
    /// Columns required in one named table.
    pub required_by_table: BTreeMap<String, BTreeSet<String>>,
    /// Columns whose values must be unique within a table.
    pub key_columns: BTreeMap<String, BTreeSet<String>>,
    /// Canonical column names that header variants are compared against.
    pub semantic_roles: BTreeSet<String>,
    /// Per table, per column numeric lower bounds (inclusive).
    pub numeric_minimums: BTreeMap<String, BTreeMap<String, f64>>,
}

impl EngineSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column` in `table`, or in every table when `table` is `None`.
    pub fn require(&mut self, table: Option<&str>, column: &str) {
        match table {
            Some(t) => {
                self.required_by_table
                    .entry(t.to_string())
                    .or_default()
                    .insert(column.to_string());
            }
            None => {
                self.required_columns.insert(column.to_string());
            }
        }
    }

    pub fn add_key(&mut self, table: &str, column: &str) {
        self.key_columns
            .entry(table.to_string())
            .or_default()
            .insert(column.to_string());
    }

    pub fn add_role(&mut self, column: &str) {
        self.semantic_roles.insert(column.to_string());
    }

    /// Set a lower bound; when two rules bound the same column the
    /// stricter one wins.
    pub fn add_minimum(&mut self, table: &str, column: &str, minimum: f64) {
        let slot = self
            .numeric_minimums
            .entry(table.to_string())
            .or_default()
            .entry(column.to_string())
            .or_insert(minimum);
        if minimum > *slot {
            *slot = minimum;
        }
    }

    /// Builder form of [`EngineSpec::require`].
    pub fn with_required(mut self, table: Option<&str>, columns: &[&str]) -> Self {
        for column in columns {
            self.require(table, column);
        }
        self
    }

    /// Builder form of [`EngineSpec::add_key`].
    pub fn with_key(mut self, table: &str, column: &str) -> Self {
        self.add_key(table, column);
        self
    }

    /// Builder form of [`EngineSpec::add_role`].
    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        for role in roles {
            self.add_role(role);
        }
        self
    }

    /// Builder form of [`EngineSpec::add_minimum`].
    pub fn with_minimum(mut self, table: &str, column: &str, minimum: f64) -> Self {
        self.add_minimum(table, column, minimum);
        self
    }

    /// Required columns for `table`: global plus table-specific, sorted.
    pub fn required_for(&self, table: &str) -> BTreeSet<&str> {
        let mut out: BTreeSet<&str> = self.required_columns.iter().map(String::as_str).collect();
        if let Some(cols) = self.required_by_table.get(table) {
            out.extend(cols.iter().map(String::as_str));
        }
        out
    }

    pub fn keys_for(&self, table: &str) -> impl Iterator<Item = &str> {
        self.key_columns
            .get(table)
            .into_iter()
            .flat_map(|cols| cols.iter().map(String::as_str))
    }

    pub fn minimums_for(&self, table: &str) -> impl Iterator<Item = (&str, f64)> {
        self.numeric_minimums
            .get(table)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(c, m)| (c.as_str(), *m)))
    }

    /// Merge another spec into this one.
    pub fn extend(&mut self, other: &EngineSpec) {
        self.required_columns
            .extend(other.required_columns.iter().cloned());
        for (table, cols) in &other.required_by_table {
            for col in cols {
                self.require(Some(table), col);
            }
        }
        for (table, cols) in &other.key_columns {
            for col in cols {
                self.add_key(table, col);
            }
        }
        self.semantic_roles
            .extend(other.semantic_roles.iter().cloned());
        for (table, cols) in &other.numeric_minimums {
            for (col, min) in cols {
                self.add_minimum(table, col, *min);
            }
        }
    }
}
