//! Table input errors.

use std::path::PathBuf;

use super::error_code::{self, FairyErrorCode};

/// Errors raised while reading or parsing a delimited table.
/// These abort the run before any diagnostic is produced.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Table {source_name} has no header row")]
    MissingHeader { source_name: String },

    #[error("Ragged row in {source_name}: record {row} has {found} fields, header has {expected}")]
    RaggedRow {
        source_name: String,
        row: u64,
        expected: u64,
        found: u64,
    },

    #[error("Invalid UTF-8 in {source_name} at record {row}")]
    Encoding { source_name: String, row: u64 },

    #[error("Two inputs share the table name {source_name}: {first} and {second}")]
    DuplicateSource {
        source_name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Malformed table {source_name}: {message}")]
    Malformed {
        source_name: String,
        message: String,
    },
}

impl FairyErrorCode for TableError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::TABLE_IO_ERROR,
            Self::Encoding { .. } => error_code::TABLE_ENCODING_ERROR,
            Self::DuplicateSource { .. } => error_code::TABLE_DUPLICATE_SOURCE,
            _ => error_code::TABLE_PARSE_ERROR,
        }
    }
}
