//! Feature-flag store configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the JSON-backed feature-flag store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FlagConfig {
    /// Path to the flag definition file.
    pub flags_path: Option<String>,
    /// Reload interval for picking up external edits. Default: 60s.
    pub reload_ttl_secs: Option<u64>,
}

impl FlagConfig {
    pub fn effective_flags_path(&self) -> String {
        self.flags_path
            .clone()
            .unwrap_or_else(|| "feature_flags.json".to_string())
    }

    pub fn effective_reload_ttl_secs(&self) -> u64 {
        self.reload_ttl_secs.unwrap_or(60)
    }
}
