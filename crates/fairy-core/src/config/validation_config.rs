//! Table validation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_WARNINGS_PER_FILE;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidationConfig {
    /// Field delimiter. Default: inferred from the file extension.
    pub delimiter: Option<String>,
    /// Cap on the per-file warnings list in the report. Default: 200.
    pub max_warnings_per_file: Option<usize>,
}

impl ValidationConfig {
    /// Returns the configured delimiter byte, if one is set.
    pub fn delimiter_byte(&self) -> Option<u8> {
        self.delimiter.as_deref().and_then(|d| match d.as_bytes() {
            [b] => Some(*b),
            _ => None,
        })
    }

    pub fn effective_max_warnings(&self) -> usize {
        self.max_warnings_per_file
            .unwrap_or(DEFAULT_MAX_WARNINGS_PER_FILE)
    }
}
