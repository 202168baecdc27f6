//! Safety rails enforcement pipeline.
//!
//! Text destined for an end user flows neutralizer → disclaimer wrapper;
//! a separate pre-commit battery gates deployments, and the rollback
//! system restores the last known-good snapshot when the gate fails.

pub mod checks;
pub mod disclaimer;
pub mod flags;
pub mod monitor;
pub mod neutralizer;
pub mod rollback;
pub mod system;
pub mod vault;

pub use checks::{CheckContext, CheckRunner, SafetyCheck};
pub use disclaimer::DisclaimerWrapper;
pub use flags::FeatureFlagStore;
pub use monitor::MonitoringHooks;
pub use neutralizer::AdviceNeutralizer;
pub use rollback::RollbackSystem;
pub use system::{PreCommitReport, ProcessedOutput, SafetyRailsSystem};
pub use vault::EncryptionVault;
