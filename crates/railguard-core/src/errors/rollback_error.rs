//! Backup and rollback errors.

/// Errors that can occur while creating or restoring backups.
#[derive(Debug, thiserror::Error)]
pub enum RollbackError {
    #[error("Backup not found: {name}")]
    BackupNotFound { name: String },

    #[error("Backup creation failed: {message}")]
    BackupFailed { message: String },

    #[error("Invalid backup manifest at {path}: {message}")]
    ManifestInvalid { path: String, message: String },

    #[error("Restore failed for {target}: {message}")]
    RestoreFailed { target: String, message: String },

    #[error("Backup I/O error: {0}")]
    Io(#[from] std::io::Error),
}
