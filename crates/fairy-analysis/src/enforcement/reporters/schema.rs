//! Embedded report schema and self-validation.

use std::sync::OnceLock;

use fairy_core::errors::ReportError;
use jsonschema::{Draft, Validator};
use serde_json::Value;

/// JSON Schema (draft 2020-12) for the persisted report.
pub const REPORT_SCHEMA: &str = include_str!("../../../schemas/report.schema.json");

static VALIDATOR: OnceLock<Result<Validator, String>> = OnceLock::new();

fn validator() -> Result<&'static Validator, ReportError> {
    VALIDATOR
        .get_or_init(|| {
            let schema: Value = serde_json::from_str(REPORT_SCHEMA).map_err(|e| e.to_string())?;
            jsonschema::options()
                .with_draft(Draft::Draft202012)
                .build(&schema)
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|message| ReportError::SchemaUnavailable {
            message: message.clone(),
        })
}

/// Validate a rendered report document against [`REPORT_SCHEMA`].
pub fn validate_report(document: &Value) -> Result<(), ReportError> {
    let errors: Vec<String> = validator()?
        .iter_errors(document)
        .map(|e| e.to_string())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ReportError::SchemaViolation { errors })
    }
}
