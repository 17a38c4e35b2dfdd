//! Built-in rulepacks.

use fairy_core::errors::RulepackError;

use super::types::Rulepack;

pub const GEO_SEQ_BULK: &str = "GEO-SEQ-BULK";
pub const GENERIC: &str = "GENERIC";

const GEO_SEQ_BULK_V0_1_0: &str = include_str!("../../../rulepacks/GEO-SEQ-BULK/v0_1_0.json");

/// GEO bulk RNA-seq preflight over `samples.tsv` and `files.tsv`.
pub fn geo_seq_bulk() -> Result<Rulepack, RulepackError> {
    Rulepack::from_json(GEO_SEQ_BULK_V0_1_0)
}

/// Shape-only rulepack: no rules, so every submission is ready.
pub fn generic() -> Rulepack {
    Rulepack::new(GENERIC, "0.1.0")
}

/// Resolve a preset by name, ignoring ASCII case.
pub fn by_name(name: &str) -> Result<Rulepack, RulepackError> {
    if name.eq_ignore_ascii_case(GEO_SEQ_BULK) {
        geo_seq_bulk()
    } else if name.eq_ignore_ascii_case(GENERIC) {
        Ok(generic())
    } else {
        Err(RulepackError::UnknownPreset {
            name: name.to_string(),
        })
    }
}

pub fn available_presets() -> &'static [&'static str] {
    &[GEO_SEQ_BULK, GENERIC]
}
