//! Layered configuration for the compliance pipeline.

pub mod backup_config;
pub mod flag_config;
pub mod monitoring_config;
pub mod railguard_config;
pub mod scan_config;
pub mod vault_config;

pub use backup_config::BackupConfig;
pub use flag_config::FlagConfig;
pub use monitoring_config::MonitoringConfig;
pub use railguard_config::{CliOverrides, RailguardConfig};
pub use scan_config::ScanConfig;
pub use vault_config::VaultConfig;
