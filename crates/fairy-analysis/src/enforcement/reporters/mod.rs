//! Reporters — persisted JSON report and markdown summary.

pub mod json;
pub mod markdown;
pub mod schema;
pub mod types;
pub mod writer;

pub use schema::{validate_report, REPORT_SCHEMA};
pub use types::{FileMetadata, ReportDocument};
pub use writer::ReportWriter;

use fairy_core::errors::ReportError;

/// Trait for report output formats.
pub trait Reporter {
    fn name(&self) -> &'static str;
    /// File extension, without the dot.
    fn extension(&self) -> &'static str;
    fn generate(&self, report: &ReportDocument) -> Result<String, ReportError>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "json" => Some(Box::new(json::JsonReporter::default())),
        "markdown" | "md" => Some(Box::new(markdown::MarkdownReporter)),
        _ => None,
    }
}

/// All supported format names.
pub fn available_formats() -> &'static [&'static str] {
    &["json", "markdown"]
}
