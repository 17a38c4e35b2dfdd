//! Enforcement layer — turns diagnostics into a submission verdict.
//!
//! Subsystems:
//! - `rules` — diagnostics and raw tables → findings
//! - `rulepack` — ordered, versioned rule bundles and presets
//! - `attestation` — counts and readiness verdict
//! - `reporters` — schema-checked JSON report and markdown summary

pub mod attestation;
pub mod reporters;
pub mod rulepack;
pub mod rules;
