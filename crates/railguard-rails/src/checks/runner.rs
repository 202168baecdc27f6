//! Flat check runner: fixed execution order, per-check timing.

use std::time::Instant;

use railguard_core::types::CheckResult;

use super::advice_language::AdviceLanguageCheck;
use super::code_quality::CodeQualityCheck;
use super::compliance_tests::ComplianceTestsCheck;
use super::disclaimer_coverage::DisclaimerCoverageCheck;
use super::secrets::ExposedSecretsCheck;
use super::test_coverage::TestCoverageCheck;
use super::{CheckContext, SafetyCheck};

/// Runs the check battery in fixed order.
///
/// Aggregation is a flat reduction: the gate approves exactly when no
/// result is a blocking failure. There is no dependency graph and no
/// short-circuiting in the default battery.
pub struct CheckRunner {
    checks: Vec<Box<dyn SafetyCheck>>,
}

impl CheckRunner {
    /// Create a runner with the default battery of 6 checks.
    pub fn new() -> Self {
        let checks: Vec<Box<dyn SafetyCheck>> = vec![
            Box::new(ComplianceTestsCheck),
            Box::new(ExposedSecretsCheck),
            Box::new(AdviceLanguageCheck),
            Box::new(DisclaimerCoverageCheck),
            Box::new(TestCoverageCheck),
            Box::new(CodeQualityCheck),
        ];
        Self { checks }
    }

    /// Create a runner with custom checks (tests, reduced batteries).
    pub fn with_checks(checks: Vec<Box<dyn SafetyCheck>>) -> Self {
        Self { checks }
    }

    /// Execute every check, in order, and return all results.
    pub fn run_all(&self, ctx: &CheckContext) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            let start = Instant::now();
            let mut result = check.run(ctx);
            result.execution_time_ms = start.elapsed().as_millis() as u64;
            tracing::debug!(
                check = check.name(),
                status = result.status.as_str(),
                elapsed_ms = result.execution_time_ms,
                "check completed"
            );
            results.push(result);
        }
        results
    }

    /// The gate: approved when no result is a blocking failure.
    pub fn approved(results: &[CheckResult]) -> bool {
        !results.iter().any(|r| r.is_blocking_failure())
    }
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::new()
    }
}
