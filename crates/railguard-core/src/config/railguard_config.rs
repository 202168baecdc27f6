//! Top-level Railguard configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BackupConfig, FlagConfig, MonitoringConfig, ScanConfig, VaultConfig};
use crate::errors::ConfigError;
use crate::types::ComplianceLevel;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RAILGUARD_*`)
/// 3. Project config (`railguard.toml` in project root)
/// 4. User config (`~/.railguard/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RailguardConfig {
    pub compliance_level: ComplianceLevel,
    pub scan: ScanConfig,
    pub flags: FlagConfig,
    pub backup: BackupConfig,
    pub monitoring: MonitoringConfig,
    pub vault: VaultConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub compliance_level: Option<ComplianceLevel>,
    pub flags_path: Option<String>,
    pub backup_path: Option<String>,
    pub max_backups: Option<u32>,
}

impl RailguardConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        // Non-parse errors from user config are warnings, not fatal.
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "skipping unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("railguard.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RailguardConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.monitoring.alert_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "monitoring.alert_threshold".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(threshold) = config.monitoring.critical_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "monitoring.critical_threshold".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(max) = config.backup.max_backups {
            if max == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "backup.max_backups".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(len) = config.scan.max_line_length {
            if len == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.max_line_length".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.railguard/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        home_dir().map(|h| h.join(".railguard").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RailguardConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: RailguardConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` (or non-empty) value.
    fn merge(base: &mut RailguardConfig, other: &RailguardConfig) {
        if other.compliance_level != ComplianceLevel::default() {
            base.compliance_level = other.compliance_level;
        }

        // Scan
        if !other.scan.exclude_dirs.is_empty() {
            base.scan.exclude_dirs = other.scan.exclude_dirs.clone();
        }
        if !other.scan.exclude_file_patterns.is_empty() {
            base.scan.exclude_file_patterns = other.scan.exclude_file_patterns.clone();
        }
        if other.scan.max_line_length.is_some() {
            base.scan.max_line_length = other.scan.max_line_length;
        }
        if other.scan.max_file_lines.is_some() {
            base.scan.max_file_lines = other.scan.max_file_lines;
        }
        if !other.scan.test_command.is_empty() {
            base.scan.test_command = other.scan.test_command.clone();
        }
        if other.scan.test_timeout_secs.is_some() {
            base.scan.test_timeout_secs = other.scan.test_timeout_secs;
        }
        if other.scan.results_file.is_some() {
            base.scan.results_file = other.scan.results_file.clone();
        }

        // Flags
        if other.flags.flags_path.is_some() {
            base.flags.flags_path = other.flags.flags_path.clone();
        }
        if other.flags.reload_ttl_secs.is_some() {
            base.flags.reload_ttl_secs = other.flags.reload_ttl_secs;
        }

        // Backup
        if other.backup.max_backups.is_some() {
            base.backup.max_backups = other.backup.max_backups;
        }
        if other.backup.backup_path.is_some() {
            base.backup.backup_path = other.backup.backup_path.clone();
        }
        if !other.backup.tracked_directories.is_empty() {
            base.backup.tracked_directories = other.backup.tracked_directories.clone();
        }
        if !other.backup.tracked_files.is_empty() {
            base.backup.tracked_files = other.backup.tracked_files.clone();
        }
        if other.backup.datastore_glob.is_some() {
            base.backup.datastore_glob = other.backup.datastore_glob.clone();
        }

        // Monitoring
        if other.monitoring.db_path.is_some() {
            base.monitoring.db_path = other.monitoring.db_path.clone();
        }
        if other.monitoring.alert_threshold.is_some() {
            base.monitoring.alert_threshold = other.monitoring.alert_threshold;
        }
        if other.monitoring.critical_threshold.is_some() {
            base.monitoring.critical_threshold = other.monitoring.critical_threshold;
        }

        // Vault
        if other.vault.key_file.is_some() {
            base.vault.key_file = other.vault.key_file.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `RAILGUARD_COMPLIANCE_LEVEL`, `RAILGUARD_FLAGS_PATH`, etc.
    fn apply_env_overrides(config: &mut RailguardConfig) {
        if let Ok(val) = std::env::var("RAILGUARD_COMPLIANCE_LEVEL") {
            match val.to_lowercase().as_str() {
                "strict" => config.compliance_level = ComplianceLevel::Strict,
                "moderate" => config.compliance_level = ComplianceLevel::Moderate,
                "permissive" => config.compliance_level = ComplianceLevel::Permissive,
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("RAILGUARD_FLAGS_PATH") {
            config.flags.flags_path = Some(val);
        }
        if let Ok(val) = std::env::var("RAILGUARD_BACKUP_PATH") {
            config.backup.backup_path = Some(val);
        }
        if let Ok(val) = std::env::var("RAILGUARD_MAX_BACKUPS") {
            if let Ok(v) = val.parse::<u32>() {
                config.backup.max_backups = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RAILGUARD_TEST_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.test_timeout_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RAILGUARD_MONITORING_DB") {
            config.monitoring.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("RAILGUARD_KEY_FILE") {
            config.vault.key_file = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RailguardConfig, cli: &CliOverrides) {
        if let Some(level) = cli.compliance_level {
            config.compliance_level = level;
        }
        if let Some(ref path) = cli.flags_path {
            config.flags.flags_path = Some(path.clone());
        }
        if let Some(ref path) = cli.backup_path {
            config.backup.backup_path = Some(path.clone());
        }
        if let Some(max) = cli.max_backups {
            config.backup.max_backups = Some(max);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
