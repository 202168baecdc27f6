//! The `SafetyRailsSystem` façade. Composes the pipeline stages and is
//! the single place where check results become a boolean gate decision.

pub mod maintenance;

use std::path::{Path, PathBuf};
use std::time::Instant;

use railguard_core::config::RailguardConfig;
use railguard_core::errors::{RailsError, RollbackError};
use railguard_core::types::{CheckResult, ComplianceLevel, GeneratedOutput, OutputContext};
use railguard_storage::queries::alerts;
use railguard_storage::DatabaseManager;

use crate::checks::{CheckContext, CheckRunner};
use crate::disclaimer::DisclaimerWrapper;
use crate::flags::FeatureFlagStore;
use crate::monitor::MonitoringHooks;
use crate::neutralizer::AdviceNeutralizer;
use crate::rollback::RollbackSystem;
use crate::vault::EncryptionVault;

/// Result of one full pre-commit battery run.
#[derive(Debug, Clone)]
pub struct PreCommitReport {
    pub results: Vec<CheckResult>,
    /// True when no result is a blocking failure.
    pub approved: bool,
    /// Non-blocking concerns surfaced to the caller.
    pub warnings: Vec<String>,
}

/// A pipeline-processed output ready to show to an end user.
#[derive(Debug, Clone)]
pub struct ProcessedOutput {
    pub text: String,
    pub interaction_id: String,
    pub transformations: Vec<String>,
    pub borderline: Vec<String>,
    pub requires_human_review: bool,
}

/// Top-level façade over the safety rails subsystems.
///
/// Constructed explicitly and passed by reference; there are no
/// module-level singletons, so tests and concurrent callers each own
/// their instance.
pub struct SafetyRailsSystem {
    root: PathBuf,
    config: RailguardConfig,
    neutralizer: AdviceNeutralizer,
    wrapper: DisclaimerWrapper,
    vault: EncryptionVault,
    flags: FeatureFlagStore,
    rollback: RollbackSystem,
    db: DatabaseManager,
}

impl SafetyRailsSystem {
    /// Build the full system under a project root.
    pub fn new(root: &Path, config: RailguardConfig) -> Result<Self, RailsError> {
        let vault = EncryptionVault::open(&root.join(config.vault.effective_key_file()))?;
        let flags = FeatureFlagStore::open(
            &root.join(config.flags.effective_flags_path()),
            config.flags.effective_reload_ttl_secs(),
        )?;
        let rollback = RollbackSystem::new(root, config.backup.clone());
        let db = DatabaseManager::open(&root.join(config.monitoring.effective_db_path()))?;
        Ok(Self {
            root: root.to_path_buf(),
            config: config.clone(),
            neutralizer: AdviceNeutralizer::new(),
            wrapper: DisclaimerWrapper::new(config.compliance_level),
            vault,
            flags,
            rollback,
            db,
        })
    }

    pub fn compliance_level(&self) -> ComplianceLevel {
        self.config.compliance_level
    }

    pub fn vault(&self) -> &EncryptionVault {
        &self.vault
    }

    pub fn flags_mut(&mut self) -> &mut FeatureFlagStore {
        &mut self.flags
    }

    pub fn rollback(&self) -> &RollbackSystem {
        &self.rollback
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    /// Run an output through the full pipeline: neutralize, wrap, log.
    ///
    /// Every text destined for an end user passes through here exactly
    /// once; the wrapper's idempotence guard keeps re-processing safe.
    pub fn process_output(
        &self,
        output: GeneratedOutput,
        ctx: &OutputContext,
    ) -> Result<ProcessedOutput, RailsError> {
        let start = Instant::now();
        let report = self.neutralizer.scan_and_neutralize(output.text(), false);
        let neutralized = GeneratedOutput::plain(report.neutralized_text.clone());
        let wrapped = self.wrapper.apply(&neutralized, ctx)?;

        let monitor = MonitoringHooks::new(&self.db, self.config.monitoring.clone());
        let interaction_id = monitor.log_interaction(
            output.text(),
            &wrapped,
            ctx,
            start.elapsed().as_millis() as u64,
            false,
        )?;

        Ok(ProcessedOutput {
            text: wrapped,
            interaction_id,
            transformations: report.transformations,
            borderline: report.borderline,
            requires_human_review: report.requires_human_review,
        })
    }

    /// Run the pre-commit battery and reduce it to the gate decision.
    ///
    /// Approval fails exactly when some result is a blocking failure;
    /// warnings never block but are always surfaced.
    pub fn run_precommit_checks(&self) -> PreCommitReport {
        let ctx = CheckContext {
            root: self.root.clone(),
            scan: self.config.scan.clone(),
            level: self.config.compliance_level,
        };
        let results = CheckRunner::new().run_all(&ctx);
        let approved = CheckRunner::approved(&results);
        let warnings = results
            .iter()
            .filter(|r| r.status == railguard_core::types::CheckStatus::Warning)
            .map(|r| format!("{}: {}", r.check_name, r.message))
            .collect();

        if approved {
            tracing::info!(checks = results.len(), "pre-commit gate APPROVED");
        } else {
            let failing: Vec<&str> = results
                .iter()
                .filter(|r| r.is_blocking_failure())
                .map(|r| r.check_name.as_str())
                .collect();
            tracing::error!(?failing, "pre-commit gate BLOCKED");
        }

        PreCommitReport {
            results,
            approved,
            warnings,
        }
    }

    /// Create a named (or timestamped) backup.
    pub fn create_backup(&self, name: Option<&str>) -> Result<PathBuf, RollbackError> {
        self.rollback.create_backup(name)
    }

    /// Emergency path: restore the most recent backup.
    pub fn emergency_rollback(&self) -> Result<bool, RollbackError> {
        self.rollback.emergency_rollback()
    }

    /// Start the background maintenance loop (daily rollup + scheduled
    /// backup). Opt-in; `new()` never spawns threads.
    pub fn start_maintenance(&self, tick: std::time::Duration) -> maintenance::MaintenanceHandle {
        maintenance::spawn(
            self.root.clone(),
            self.root.join(self.config.monitoring.effective_db_path()),
            self.config.monitoring.clone(),
            self.config.backup.clone(),
            tick,
        )
    }

    /// JSON status snapshot for the CLI.
    pub fn status(&mut self) -> Result<serde_json::Value, RailsError> {
        let backups = self.rollback.list_backups()?;
        let unresolved = self.db.with_conn(alerts::unresolved_count)?;
        let flags = self.flags.all_flags();
        Ok(serde_json::json!({
            "compliance_level": self.config.compliance_level,
            "flag_count": flags.len(),
            "backup_count": backups.len(),
            "latest_backup": backups.first(),
            "unresolved_alerts": unresolved,
        }))
    }
}
