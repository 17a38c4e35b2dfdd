//! Rulepacks — versioned bundles of rules, built in code or from JSON.

pub mod definition;
pub mod presets;
pub mod types;

pub use definition::{CheckDefinition, RuleDefinition, RulepackDefinition};
pub use presets::{available_presets, by_name};
pub use types::{Rulepack, RulepackIdentity};
