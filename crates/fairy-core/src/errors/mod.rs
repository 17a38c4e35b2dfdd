//! Error handling for FAIRy.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod attestation_error;
pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod report_error;
pub mod rulepack_error;
pub mod table_error;

pub use attestation_error::AttestationError;
pub use config_error::ConfigError;
pub use error_code::FairyErrorCode;
pub use pipeline_error::PipelineError;
pub use report_error::ReportError;
pub use rulepack_error::RulepackError;
pub use table_error::TableError;
