//! Configuration system for FAIRy.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod fairy_config;
pub mod report_config;
pub mod rulepack_config;
pub mod validation_config;

pub use fairy_config::{ConfigOverrides, FairyConfig};
pub use report_config::ReportConfig;
pub use rulepack_config::RulepackConfig;
pub use validation_config::ValidationConfig;
