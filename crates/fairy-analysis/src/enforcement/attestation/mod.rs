//! Attestation — readiness verdict over the concatenated findings.

pub mod aggregator;
pub mod types;

pub use aggregator::AttestationAggregator;
pub use types::{Attestation, RunMetadata};
