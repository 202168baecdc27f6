//! Pre-commit safety checks.
//!
//! A fixed battery of six independent checks; aggregation is a flat
//! reduction over the result list (not a dependency graph:
//! approval fails exactly when some result is a blocking failure).

pub mod advice_language;
pub mod code_quality;
pub mod disclaimer_coverage;
pub mod results;
pub mod runner;
pub mod secrets;
pub mod source_walk;
pub mod test_coverage;

use std::path::PathBuf;

use railguard_core::config::ScanConfig;
use railguard_core::types::{CheckResult, ComplianceLevel};

pub use runner::CheckRunner;

/// Input shared by every check in a battery run.
#[derive(Debug, Clone)]
pub struct CheckContext {
    /// Project root the checks operate on.
    pub root: PathBuf,
    pub scan: ScanConfig,
    pub level: ComplianceLevel,
}

/// One safety check in the pre-commit battery.
///
/// Checks are side-effect-free on the project (read-only scans) except
/// for the external test runner subprocess.
pub trait SafetyCheck: Send + Sync {
    /// Stable check name used in results and CLI output.
    fn name(&self) -> &'static str;

    /// Whether a failure of this check prevents gate approval.
    fn blocking(&self) -> bool;

    /// Run the check. Must not panic; machinery failures are encoded as
    /// `Fail` or `Warning` results per the check's degradation policy.
    fn run(&self, ctx: &CheckContext) -> CheckResult;
}
