//! Strict delimited-text reader.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fairy_core::errors::TableError;
use sha2::{Digest, Sha256};

use super::types::{Table, TableSet};

/// Default delimiter for a path: comma for `.csv`, tab otherwise.
pub fn delimiter_for_path(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
        _ => b'\t',
    }
}

/// Read and parse a table from disk. The table's source name is the
/// file name; `delimiter` falls back to [`delimiter_for_path`].
pub fn read_table(path: &Path, delimiter: Option<u8>) -> Result<Table, TableError> {
    let raw = std::fs::read(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Table::parse(&name, &raw, delimiter.unwrap_or_else(|| delimiter_for_path(path)))
}

/// Read several tables into one set. Tables are keyed by file name, so two
/// paths with the same file name are rejected rather than merged.
pub fn read_tables(paths: &[PathBuf], delimiter: Option<u8>) -> Result<TableSet, TableError> {
    let mut seen: BTreeMap<String, &Path> = BTreeMap::new();
    let mut tables = TableSet::new();
    for path in paths {
        let table = read_table(path, delimiter)?;
        if let Some(first) = seen.get(&table.source) {
            return Err(TableError::DuplicateSource {
                source_name: table.source,
                first: first.to_path_buf(),
                second: path.clone(),
            });
        }
        seen.insert(table.source.clone(), path);
        tables.insert(table);
    }
    Ok(tables)
}

impl Table {
    /// Parse delimited bytes into a table.
    ///
    /// Rows whose field count differs from the header and non-UTF-8
    /// content are hard errors.
    pub fn parse(source: &str, raw: &[u8], delimiter: u8) -> Result<Table, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(raw);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| map_csv_error(source, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if columns.is_empty() || columns.iter().all(String::is_empty) {
            return Err(TableError::MissingHeader {
                source_name: source.to_string(),
            });
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| map_csv_error(source, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        let table = Table {
            source: source.to_string(),
            columns,
            rows,
            sha256: sha256_hex(raw),
            bytes: raw.len() as u64,
        };
        tracing::debug!(
            source = %table.source,
            rows = table.n_rows(),
            cols = table.n_cols(),
            "parsed table"
        );
        Ok(table)
    }
}

fn sha256_hex(raw: &[u8]) -> String {
    format!("{:x}", Sha256::digest(raw))
}

fn map_csv_error(source: &str, err: csv::Error) -> TableError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => TableError::RaggedRow {
            source_name: source.to_string(),
            row: pos.as_ref().map(|p| p.record()).unwrap_or(0),
            expected: *expected_len,
            found: *len,
        },
        csv::ErrorKind::Utf8 { pos, .. } => TableError::Encoding {
            source_name: source.to_string(),
            row: pos.as_ref().map(|p| p.record()).unwrap_or(0),
        },
        _ => TableError::Malformed {
            source_name: source.to_string(),
            message: err.to_string(),
        },
    }
}
