//! Tests for the FAIRy configuration system.

use std::sync::Mutex;

use fairy_core::config::{ConfigOverrides, FairyConfig};
use fairy_core::errors::ConfigError;

/// Serializes tests that touch environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_fairy_env_vars() {
    for key in [
        "FAIRY_DELIMITER",
        "FAIRY_MAX_WARNINGS",
        "FAIRY_RULEPACK",
        "FAIRY_RULEPACK_PATH",
        "FAIRY_REPORT_FILENAME",
        "FAIRY_REPORT_MARKDOWN",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fairy_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("fairy.toml"),
        r#"
[validation]
max_warnings_per_file = 50

[rulepack]
preset = "GENERIC"

[report]
markdown = true
"#,
    )
    .unwrap();

    std::env::set_var("FAIRY_MAX_WARNINGS", "75");

    let overrides = ConfigOverrides {
        rulepack_preset: Some("GEO-SEQ-BULK".into()),
        ..Default::default()
    };
    let config = FairyConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Overrides beat project config.
    assert_eq!(config.rulepack.effective_preset(), "GEO-SEQ-BULK");
    // Env beats project config.
    assert_eq!(config.validation.effective_max_warnings(), 75);
    // Project config beats defaults.
    assert!(config.report.effective_markdown());

    clear_fairy_env_vars();
}

#[test]
fn test_defaults_without_files() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fairy_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let config = FairyConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.rulepack.effective_preset(), "GEO-SEQ-BULK");
    assert_eq!(config.report.effective_filename(), "report.json");
    assert!(config.report.effective_pretty());
    assert!(!config.report.effective_markdown());
    assert_eq!(config.validation.effective_max_warnings(), 200);
    assert_eq!(config.validation.delimiter_byte(), None);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fairy_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("fairy.toml"), "[report\nfilename = ").unwrap();

    let err = FairyConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_unparseable_env_value_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fairy_env_vars();
    let dir = tempfile::TempDir::new().unwrap();

    std::env::set_var("FAIRY_MAX_WARNINGS", "lots");
    let err = FairyConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidEnvVar { var: "FAIRY_MAX_WARNINGS", ref value, .. } if value == "lots"
    ));
    clear_fairy_env_vars();

    std::env::set_var("FAIRY_REPORT_MARKDOWN", "yes");
    let err = FairyConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { var: "FAIRY_REPORT_MARKDOWN", .. }));
    clear_fairy_env_vars();
}

#[test]
fn test_validation_rejects_bad_values() {
    let err = FairyConfig::from_toml("[validation]\ndelimiter = \";;\"\n").unwrap_err();
    assert!(
        matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "validation.delimiter")
    );

    let err = FairyConfig::from_toml("[validation]\nmax_warnings_per_file = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));

    let err = FairyConfig::from_toml("[report]\nfilename = \"out/report.json\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));

    let err = FairyConfig::from_toml("[report]\nfilename = \"report.txt\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_unknown_keys_ignored() {
    let config = FairyConfig::from_toml(
        r#"
[validation]
delimiter = ","
future_option = true

[something_new]
x = 1
"#,
    )
    .unwrap();
    assert_eq!(config.validation.delimiter_byte(), Some(b','));
}

#[test]
fn test_toml_round_trip() {
    let config = FairyConfig::from_toml(
        r#"
[rulepack]
path = "rulepacks/custom.json"

[report]
filename = "attestation.json"
pretty = false
"#,
    )
    .unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = FairyConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.rulepack.path.as_deref(), Some("rulepacks/custom.json"));
    assert_eq!(reparsed.report.effective_filename(), "attestation.json");
    assert!(!reparsed.report.effective_pretty());
}
