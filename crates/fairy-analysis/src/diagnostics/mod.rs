//! Diagnostic engine: structural checks over parsed tables.
//!
//! Knows nothing about repository policy; rulepacks turn its output
//! into findings.

pub mod engine;
pub mod spec;
pub mod types;

pub use engine::{normalize_header, role_key, DiagnosticEngine};
pub use spec::EngineSpec;
pub use types::*;
