//! Report output configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REPORT_FILENAME;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Report file name inside the output directory. Default: "report.json".
    pub filename: Option<String>,
    /// Pretty-print JSON. Default: true.
    pub pretty: Option<bool>,
    /// Also write a Markdown summary next to the JSON report. Default: false.
    pub markdown: Option<bool>,
}

impl ReportConfig {
    pub fn effective_filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(DEFAULT_REPORT_FILENAME)
    }

    pub fn effective_pretty(&self) -> bool {
        self.pretty.unwrap_or(true)
    }

    pub fn effective_markdown(&self) -> bool {
        self.markdown.unwrap_or(false)
    }
}
