//! Rulepack selection.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RULEPACK_PRESET;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulepackConfig {
    /// Built-in preset name. Default: "GEO-SEQ-BULK".
    pub preset: Option<String>,
    /// Path to a JSON rulepack definition. Takes precedence over `preset`.
    pub path: Option<String>,
}

impl RulepackConfig {
    pub fn effective_preset(&self) -> &str {
        self.preset.as_deref().unwrap_or(DEFAULT_RULEPACK_PRESET)
    }
}
