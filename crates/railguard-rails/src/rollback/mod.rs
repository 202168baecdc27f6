//! Backup and rollback: directory snapshots with manifests, retention
//! pruning, and an emergency path that restores the newest backup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use railguard_core::config::BackupConfig;
use railguard_core::epoch_secs;
use railguard_core::errors::RollbackError;

/// Manifest written at the root of every backup directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupManifest {
    pub backup_name: String,
    pub created_at: u64,
    pub created_by: String,
    pub directories_backed_up: Vec<String>,
    pub files_backed_up: Vec<String>,
    pub backup_size_mb: f64,
}

const MANIFEST_FILE: &str = "manifest.json";

/// Snapshot/restore over the tracked directory set.
pub struct RollbackSystem {
    root: PathBuf,
    backup_root: PathBuf,
    config: BackupConfig,
}

impl RollbackSystem {
    pub fn new(root: &Path, config: BackupConfig) -> Self {
        let backup_root = root.join(config.effective_backup_path());
        Self {
            root: root.to_path_buf(),
            backup_root,
            config,
        }
    }

    /// Create a backup and return its directory.
    ///
    /// Copies the tracked directories and files plus datastore glob
    /// matches, writes the manifest, then prunes backups beyond the
    /// retention count. A failure mid-copy removes the partial backup
    /// directory; no half-written backup is ever left behind.
    pub fn create_backup(&self, name: Option<&str>) -> Result<PathBuf, RollbackError> {
        self.create_backup_protecting(name, None)
    }

    /// Backup creation with one backup shielded from retention pruning.
    /// The rollback path protects its restore source here: pruning after
    /// the pre-rollback backup must never delete the backup about to be
    /// restored, even when it is the oldest one past the retention count.
    fn create_backup_protecting(
        &self,
        name: Option<&str>,
        protect: Option<&str>,
    ) -> Result<PathBuf, RollbackError> {
        let created_at = epoch_secs();
        let name = match name {
            Some(n) => n.to_string(),
            None => format!("backup-{created_at}"),
        };
        let backup_dir = self.backup_root.join(&name);
        if backup_dir.exists() {
            return Err(RollbackError::BackupFailed {
                message: format!("backup {name} already exists"),
            });
        }
        std::fs::create_dir_all(&backup_dir)?;

        match self.populate_backup(&backup_dir, &name, created_at) {
            Ok(manifest) => {
                tracing::info!(
                    backup = %name,
                    size_mb = manifest.backup_size_mb,
                    "backup created"
                );
                self.prune(protect);
                Ok(backup_dir)
            }
            Err(e) => {
                let _ = std::fs::remove_dir_all(&backup_dir);
                Err(e)
            }
        }
    }

    /// Restore the named backup.
    ///
    /// Always creates a fresh pre-rollback backup first (that ordering is
    /// a hard safety invariant), then deletes and replaces each target
    /// listed in the manifest.
    pub fn rollback_to(&self, name: &str) -> Result<bool, RollbackError> {
        let backup_dir = self.backup_root.join(name);
        let manifest = self.read_manifest(&backup_dir)?;

        let pre_name = format!("pre-rollback-{}", epoch_secs());
        self.create_backup_protecting(Some(&pre_name), Some(name))?;
        tracing::info!(backup = name, pre_backup = %pre_name, "starting rollback");

        for dir in &manifest.directories_backed_up {
            let source = backup_dir.join(dir);
            let target = self.root.join(dir);
            if target.exists() {
                std::fs::remove_dir_all(&target).map_err(|e| RollbackError::RestoreFailed {
                    target: dir.clone(),
                    message: e.to_string(),
                })?;
            }
            copy_dir(&source, &target).map_err(|e| RollbackError::RestoreFailed {
                target: dir.clone(),
                message: e.to_string(),
            })?;
        }
        for file in &manifest.files_backed_up {
            let source = backup_dir.join(file);
            let target = self.root.join(file);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&source, &target).map_err(|e| RollbackError::RestoreFailed {
                target: file.clone(),
                message: e.to_string(),
            })?;
        }

        tracing::info!(backup = name, "rollback complete");
        Ok(true)
    }

    /// Restore the most recently created backup. Returns false when no
    /// backups exist.
    pub fn emergency_rollback(&self) -> Result<bool, RollbackError> {
        let Some(newest) = self.newest_backup()? else {
            tracing::error!("emergency rollback requested but no backups exist");
            return Ok(false);
        };
        tracing::warn!(backup = %newest, "EMERGENCY ROLLBACK");
        self.rollback_to(&newest)
    }

    /// Names of existing backups, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>, RollbackError> {
        let mut entries: Vec<(u64, String)> = Vec::new();
        if !self.backup_root.exists() {
            return Ok(Vec::new());
        }
        for entry in std::fs::read_dir(&self.backup_root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let created = self
                .read_manifest(&entry.path())
                .map(|m| m.created_at)
                .unwrap_or_else(|_| dir_mtime_secs(&entry.path()));
            entries.push((created, name));
        }
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries.into_iter().map(|(_, name)| name).collect())
    }

    fn newest_backup(&self) -> Result<Option<String>, RollbackError> {
        Ok(self.list_backups()?.into_iter().next())
    }

    fn populate_backup(
        &self,
        backup_dir: &Path,
        name: &str,
        created_at: u64,
    ) -> Result<BackupManifest, RollbackError> {
        let mut directories = Vec::new();
        let mut files = Vec::new();
        let mut total_bytes = 0u64;

        for dir in &self.config.tracked_directories {
            let source = self.root.join(dir);
            if !source.exists() {
                continue;
            }
            total_bytes += copy_dir(&source, &backup_dir.join(dir)).map_err(|e| {
                RollbackError::BackupFailed {
                    message: format!("{dir}: {e}"),
                }
            })?;
            directories.push(dir.clone());
        }

        let mut tracked_files = self.config.tracked_files.clone();
        if let Some(pattern) = &self.config.datastore_glob {
            let full_pattern = self.root.join(pattern).display().to_string();
            if let Ok(paths) = glob::glob(&full_pattern) {
                for path in paths.flatten() {
                    if let Ok(rel) = path.strip_prefix(&self.root) {
                        tracked_files.push(rel.display().to_string());
                    }
                }
            }
        }

        for file in &tracked_files {
            let source = self.root.join(file);
            if !source.is_file() {
                continue;
            }
            // Never back up the backup tree itself.
            if source.starts_with(&self.backup_root) {
                continue;
            }
            let target = backup_dir.join(file);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            total_bytes += std::fs::copy(&source, &target).map_err(|e| {
                RollbackError::BackupFailed {
                    message: format!("{file}: {e}"),
                }
            })?;
            files.push(file.clone());
        }

        let manifest = BackupManifest {
            backup_name: name.to_string(),
            created_at,
            created_by: "railguard".to_string(),
            directories_backed_up: directories,
            files_backed_up: files,
            backup_size_mb: total_bytes as f64 / (1024.0 * 1024.0),
        };
        let manifest_json = serde_json::to_string_pretty(&manifest).map_err(|e| {
            RollbackError::BackupFailed {
                message: e.to_string(),
            }
        })?;
        std::fs::write(backup_dir.join(MANIFEST_FILE), manifest_json)?;
        Ok(manifest)
    }

    fn read_manifest(&self, backup_dir: &Path) -> Result<BackupManifest, RollbackError> {
        let path = backup_dir.join(MANIFEST_FILE);
        if !backup_dir.exists() {
            return Err(RollbackError::BackupNotFound {
                name: backup_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| {
            RollbackError::ManifestInvalid {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        serde_json::from_str(&content).map_err(|e| RollbackError::ManifestInvalid {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Delete the oldest backups beyond the retention count, skipping
    /// `protect` when set. Pruning is best-effort; failures are logged
    /// and skipped.
    fn prune(&self, protect: Option<&str>) {
        let max = self.config.effective_max_backups() as usize;
        let Ok(backups) = self.list_backups() else {
            return;
        };
        for name in backups.iter().skip(max) {
            if protect == Some(name.as_str()) {
                continue;
            }
            let path = self.backup_root.join(name);
            match std::fs::remove_dir_all(&path) {
                Ok(()) => tracing::debug!(backup = %name, "pruned old backup"),
                Err(e) => tracing::warn!(backup = %name, error = %e, "prune failed"),
            }
        }
    }
}

/// Recursive directory copy; returns total bytes copied.
fn copy_dir(source: &Path, target: &Path) -> std::io::Result<u64> {
    std::fs::create_dir_all(target)?;
    let mut total = 0u64;
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();
        let dest = target.join(entry.file_name());
        if path.is_dir() {
            total += copy_dir(&path, &dest)?;
        } else {
            total += std::fs::copy(&path, &dest)?;
        }
    }
    Ok(total)
}

fn dir_mtime_secs(path: &Path) -> u64 {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
