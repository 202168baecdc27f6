//! Core types, errors, and configuration for the Railguard compliance
//! enforcement pipeline.

pub mod config;
pub mod errors;
pub mod types;

pub use config::RailguardConfig;
pub use errors::RailsError;
pub use types::{
    AlertLevel, CheckResult, CheckStatus, ComplianceAlert, ComplianceLevel, GeneratedOutput,
    InteractionRecord, RepairResult, RepairStatus,
};

/// Current epoch time in whole seconds. All persisted timestamps use this.
pub fn epoch_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
