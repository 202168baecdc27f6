//! Storage errors.

/// Errors that can occur in the sqlite store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Sqlite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}
