//! Top-level pipeline errors.
//! Aggregates subsystem errors via `From` conversions.

use super::{ConfigError, FlagError, RollbackError, StorageError, VaultError};

/// Errors surfaced by the `SafetyRailsSystem` façade.
///
/// The façade is the only place allowed to convert these into a boolean
/// gate decision; it must never hide a blocking failure behind a warning.
#[derive(Debug, thiserror::Error)]
pub enum RailsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),

    #[error("Flag error: {0}")]
    Flag(#[from] FlagError),

    #[error("Rollback error: {0}")]
    Rollback(#[from] RollbackError),

    /// An output reached the disclaimer stage in a shape the pipeline
    /// cannot wrap. Raised only under `ComplianceLevel::Strict`; lenient
    /// levels log the bypass and pass the value through.
    #[error("Disclaimer bypass detected (content hash {content_hash})")]
    BypassDetected {
        content_hash: String,
        preview: String,
    },
}
