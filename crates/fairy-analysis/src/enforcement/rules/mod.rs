//! Rules — map diagnostics and raw tables to policy findings.

pub mod bio_context;
pub mod crosscheck;
pub mod dates;
pub mod mapped;
pub mod pairing;
pub mod processed;
pub mod required;
pub mod types;

pub use bio_context::BioContextRule;
pub use crosscheck::UnmatchedSampleRule;
pub use dates::{is_iso8601, IsoDateRule};
pub use mapped::{BelowMinimumRule, ColumnNamesRule, DuplicateSampleRule};
pub use pairing::{PairingColumns, PairingRule};
pub use processed::ProcessedDataRule;
pub use required::MissingFieldRule;
pub use types::*;
