//! FAIRy analysis: validates tabular submission metadata against
//! repository rulepacks and produces a schema-checked attestation report.
//!
//! Data flows strictly forward:
//! tables → diagnostic engine → rulepack(s) → attestation → report.

pub mod diagnostics;
pub mod enforcement;
pub mod pipeline;
pub mod table;
