//! In-memory table model.

use std::collections::BTreeMap;

/// A parsed delimited table.
///
/// Every row has exactly `columns.len()` cells; the reader rejects ragged
/// input before a `Table` is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Source identifier, normally the file name (e.g. `samples.tsv`).
    pub source: String,
    /// Declared header, in file order.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Lower-case hex SHA-256 of the raw input bytes.
    pub sha256: String,
    /// Size of the raw input in bytes.
    pub bytes: u64,
}

impl Table {
    /// Index of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Cell value at `row` for column `name`, if both exist.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.rows.get(row).and_then(|r| r.get(idx)).map(String::as_str)
    }

    /// Trimmed cell value; a missing column reads as empty.
    pub fn value(&self, row: usize, name: &str) -> &str {
        self.cell(row, name).map(str::trim).unwrap_or("")
    }

    /// Iterate `(row_index, trimmed value)` for one column.
    /// Yields nothing when the column is absent.
    pub fn column_values<'a>(&'a self, name: &str) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        let idx = self.column_index(name);
        self.rows
            .iter()
            .enumerate()
            .filter_map(move |(i, row)| idx.and_then(|c| row.get(c)).map(|v| (i, v.trim())))
    }
}

/// Tables of one submission keyed by source name.
///
/// Backed by a `BTreeMap` so iteration order is always by name.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: BTreeMap<String, Table>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table under its source name, replacing any previous one.
    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.source.clone(), table);
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<Table> for TableSet {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        let mut set = Self::new();
        for table in iter {
            set.insert(table);
        }
        set
    }
}
