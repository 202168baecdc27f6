//! Shared types for the compliance pipeline.

pub mod check;
pub mod monitor;
pub mod output;
pub mod repair;

pub use check::{CheckResult, CheckStatus};
pub use monitor::{AlertLevel, ComplianceAlert, InteractionRecord};
pub use output::{GeneratedOutput, OutputContext};
pub use repair::{RepairResult, RepairStatus};

use serde::{Deserialize, Serialize};

/// Process-wide strictness level.
///
/// Controls whether a pipeline transformation failure raises, logs, or
/// silently passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceLevel {
    /// Transformation failures are errors.
    #[default]
    Strict,
    /// Transformation failures are logged and the value passes through.
    Moderate,
    /// Transformation failures pass silently.
    Permissive,
}
