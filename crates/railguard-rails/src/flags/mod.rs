//! Feature flags: JSON-backed store with TTL reload, stable percentage
//! rollout, and a write-through kill switch.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fd_lock::RwLock as FdRwLock;
use rand::Rng;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use railguard_core::epoch_secs;
use railguard_core::errors::FlagError;

/// One feature flag definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlag {
    pub enabled: bool,
    pub status: String,
    /// Percentage of callers for whom the flag evaluates enabled, [0, 100].
    pub rollout_percentage: u8,
    pub created_at: u64,
    pub dependencies: Vec<String>,
    /// Forces the feature off regardless of every other setting.
    pub kill_switch: bool,
}

impl Default for FeatureFlag {
    fn default() -> Self {
        Self {
            enabled: false,
            status: "defined".to_string(),
            rollout_percentage: 100,
            created_at: epoch_secs(),
            dependencies: Vec::new(),
            kill_switch: false,
        }
    }
}

/// On-disk flag file shape.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
struct FlagFile {
    metadata: serde_json::Value,
    features: HashMap<String, FeatureFlag>,
}

/// JSON-backed feature flag store.
///
/// Definitions are re-read when the TTL has elapsed (simple cache, not
/// file-watching). Writes go through an advisory file lock: the
/// deployment model is single-writer, and the lock keeps an accidental
/// second writer from interleaving.
pub struct FeatureFlagStore {
    path: PathBuf,
    ttl: Duration,
    file: FlagFile,
    loaded_at: Option<Instant>,
}

impl FeatureFlagStore {
    /// Open the store. A missing file starts empty and is created on the
    /// first write.
    pub fn open(path: &Path, ttl_secs: u64) -> Result<Self, FlagError> {
        let mut store = Self {
            path: path.to_path_buf(),
            ttl: Duration::from_secs(ttl_secs),
            file: FlagFile::default(),
            loaded_at: None,
        };
        store.reload()?;
        Ok(store)
    }

    /// Is `name` enabled for this caller?
    ///
    /// False for unknown, disabled, or kill-switched flags. Partial
    /// rollouts hash the user id stably, so a given user always receives
    /// the same decision for a fixed configuration. Anonymous callers are
    /// sampled randomly and the decision is not reproducible.
    pub fn is_enabled(&mut self, name: &str, user_id: Option<&str>) -> bool {
        self.maybe_reload();

        let Some(flag) = self.file.features.get(name) else {
            return false;
        };
        if !flag.enabled || flag.kill_switch {
            return false;
        }
        let rollout = flag.rollout_percentage.min(100);
        if rollout >= 100 {
            return true;
        }
        match user_id {
            Some(id) => (xxh3_64(id.as_bytes()) % 100) < u64::from(rollout),
            None => rand::thread_rng().gen_range(0..100u8) < rollout,
        }
    }

    /// Enable a flag and persist.
    pub fn enable(&mut self, name: &str) -> Result<(), FlagError> {
        self.mutate(name, |flag| {
            flag.enabled = true;
            flag.status = "enabled".to_string();
        })
    }

    /// Disable a flag and persist.
    pub fn disable(&mut self, name: &str) -> Result<(), FlagError> {
        self.mutate(name, |flag| {
            flag.enabled = false;
            flag.status = "disabled".to_string();
        })
    }

    /// Set the rollout percentage (gradual rollout) and persist.
    pub fn set_rollout_percentage(&mut self, name: &str, pct: u8) -> Result<(), FlagError> {
        self.mutate(name, |flag| {
            flag.rollout_percentage = pct.min(100);
        })
    }

    /// Trip the kill switch: persists immediately and takes effect on the
    /// next `is_enabled` call without waiting for the TTL window.
    pub fn emergency_kill_switch(&mut self, name: &str) -> Result<(), FlagError> {
        tracing::warn!(flag = name, "emergency kill switch engaged");
        self.mutate(name, |flag| {
            flag.kill_switch = true;
            flag.status = "killed".to_string();
        })
    }

    /// Define a flag if absent (no-op when it exists) and persist.
    pub fn define(&mut self, name: &str, flag: FeatureFlag) -> Result<(), FlagError> {
        if !self.file.features.contains_key(name) {
            self.file.features.insert(name.to_string(), flag);
            self.persist()?;
        }
        Ok(())
    }

    /// Snapshot of all flags.
    pub fn all_flags(&mut self) -> HashMap<String, FeatureFlag> {
        self.maybe_reload();
        self.file.features.clone()
    }

    fn mutate(&mut self, name: &str, f: impl FnOnce(&mut FeatureFlag)) -> Result<(), FlagError> {
        // Read the latest definitions before mutating so a stale cache
        // never clobbers an external edit.
        self.reload()?;
        let flag = self
            .file
            .features
            .get_mut(name)
            .ok_or_else(|| FlagError::UnknownFlag {
                name: name.to_string(),
            })?;
        f(flag);
        self.persist()
    }

    fn maybe_reload(&mut self) {
        let stale = match self.loaded_at {
            Some(at) => at.elapsed() > self.ttl,
            None => true,
        };
        if stale {
            if let Err(e) = self.reload() {
                tracing::warn!(error = %e, "flag reload failed; keeping cached definitions");
            }
        }
    }

    fn reload(&mut self) -> Result<(), FlagError> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            self.file =
                serde_json::from_str(&content).map_err(|e| FlagError::ParseError {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                })?;
        }
        self.loaded_at = Some(Instant::now());
        Ok(())
    }

    /// Write-through persist under an advisory file lock.
    fn persist(&mut self) -> Result<(), FlagError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.file.metadata = serde_json::json!({ "updated_at": epoch_secs() });
        let content = serde_json::to_string_pretty(&self.file).map_err(|e| {
            FlagError::ParseError {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.path)?;
        let mut lock = FdRwLock::new(file);
        {
            let mut guard = lock.write()?;
            guard.set_len(0)?;
            guard.write_all(content.as_bytes())?;
            guard.flush()?;
        }
        self.loaded_at = Some(Instant::now());
        Ok(())
    }
}
