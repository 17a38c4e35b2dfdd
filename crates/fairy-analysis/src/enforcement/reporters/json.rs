//! JSON reporter — the persisted, schema-validated report.

use fairy_core::errors::ReportError;

use super::types::ReportDocument;
use super::writer::ReportWriter;
use super::Reporter;

pub struct JsonReporter {
    writer: ReportWriter,
}

impl JsonReporter {
    pub fn new(pretty: bool) -> Self {
        Self {
            writer: ReportWriter::new(pretty),
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &ReportDocument) -> Result<String, ReportError> {
        self.writer.render(report)
    }
}
