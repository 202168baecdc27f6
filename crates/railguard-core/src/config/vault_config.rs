//! Encryption vault configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the encryption vault.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VaultConfig {
    /// Path to the derived key file (created on first run when no
    /// environment key is supplied).
    pub key_file: Option<String>,
}

impl VaultConfig {
    pub fn effective_key_file(&self) -> String {
        self.key_file
            .clone()
            .unwrap_or_else(|| ".railguard.key".to_string())
    }
}
