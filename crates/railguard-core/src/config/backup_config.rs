//! Backup and rollback configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the backup subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BackupConfig {
    /// Maximum backups to retain. Default: 30.
    pub max_backups: Option<u32>,
    /// Root directory holding backups.
    pub backup_path: Option<String>,
    /// Directories snapshot by every backup (relative to the project root).
    pub tracked_directories: Vec<String>,
    /// Individual files snapshot by every backup.
    pub tracked_files: Vec<String>,
    /// Glob matching datastore files to include (sqlite/JSON state).
    pub datastore_glob: Option<String>,
}

impl BackupConfig {
    /// Returns the effective retention count, defaulting to 30.
    pub fn effective_max_backups(&self) -> u32 {
        self.max_backups.unwrap_or(30)
    }

    pub fn effective_backup_path(&self) -> String {
        self.backup_path
            .clone()
            .unwrap_or_else(|| "backups".to_string())
    }
}
