//! Delimited tabular input.

pub mod reader;
pub mod types;

pub use reader::{delimiter_for_path, read_table, read_tables};
pub use types::{Table, TableSet};
