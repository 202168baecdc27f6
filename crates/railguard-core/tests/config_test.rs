//! Configuration loading, merging, and validation tests.

use railguard_core::config::{CliOverrides, RailguardConfig};
use railguard_core::types::ComplianceLevel;

#[test]
fn defaults_are_sane() {
    let config = RailguardConfig::default();
    assert_eq!(config.compliance_level, ComplianceLevel::Strict);
    assert_eq!(config.backup.effective_max_backups(), 30);
    assert_eq!(config.flags.effective_reload_ttl_secs(), 60);
    assert_eq!(config.scan.effective_max_line_length(), 120);
    assert_eq!(config.scan.effective_max_file_lines(), 1000);
    assert!((config.monitoring.effective_alert_threshold() - 0.8).abs() < f64::EPSILON);
}

#[test]
fn from_toml_parses_sections() {
    let config = RailguardConfig::from_toml(
        r#"
compliance_level = "moderate"

[scan]
max_line_length = 100
test_command = ["cargo", "test"]

[backup]
max_backups = 5
backup_path = "/tmp/rg-backups"

[monitoring]
alert_threshold = 0.9
"#,
    )
    .unwrap();

    assert_eq!(config.compliance_level, ComplianceLevel::Moderate);
    assert_eq!(config.scan.effective_max_line_length(), 100);
    assert_eq!(config.scan.test_command, vec!["cargo", "test"]);
    assert_eq!(config.backup.effective_max_backups(), 5);
    assert_eq!(config.backup.effective_backup_path(), "/tmp/rg-backups");
    assert!((config.monitoring.effective_alert_threshold() - 0.9).abs() < f64::EPSILON);
}

#[test]
fn unknown_keys_are_ignored() {
    let config = RailguardConfig::from_toml(
        r#"
[scan]
max_line_length = 80
some_future_knob = true
"#,
    )
    .unwrap();
    assert_eq!(config.scan.effective_max_line_length(), 80);
}

#[test]
fn invalid_threshold_rejected() {
    let err = RailguardConfig::from_toml(
        r#"
[monitoring]
alert_threshold = 1.5
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("alert_threshold"));
}

#[test]
fn zero_max_backups_rejected() {
    let err = RailguardConfig::from_toml(
        r#"
[backup]
max_backups = 0
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("max_backups"));
}

#[test]
fn project_config_overrides_defaults_and_cli_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("railguard.toml"),
        r#"
compliance_level = "permissive"

[backup]
max_backups = 10
"#,
    )
    .unwrap();

    let cli = CliOverrides {
        max_backups: Some(3),
        ..Default::default()
    };
    let config = RailguardConfig::load(dir.path(), Some(&cli)).unwrap();
    assert_eq!(config.compliance_level, ComplianceLevel::Permissive);
    // CLI layer beats the project file.
    assert_eq!(config.backup.effective_max_backups(), 3);
}

#[test]
fn malformed_project_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("railguard.toml"), "not [valid toml").unwrap();
    assert!(RailguardConfig::load(dir.path(), None).is_err());
}
