//! Check 5: test coverage: blocking below 70%, warning between 70 and
//! 85, missing data degrades to a warning.

use railguard_core::types::CheckResult;

use super::results::TestResultsFile;
use super::{CheckContext, SafetyCheck};

const CHECK_NAME: &str = "test_coverage";

const PASS_THRESHOLD: f64 = 85.0;
const FAIL_THRESHOLD: f64 = 70.0;

pub struct TestCoverageCheck;

impl SafetyCheck for TestCoverageCheck {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    fn blocking(&self) -> bool {
        true
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let results_path = ctx.root.join(ctx.scan.effective_results_file());
        let coverage = match TestResultsFile::read(&results_path) {
            Ok(results) => results.coverage_percent,
            Err(_) => None,
        };

        match coverage {
            Some(pct) if pct >= PASS_THRESHOLD => CheckResult::pass(
                CHECK_NAME,
                format!("coverage {pct:.1}% meets the {PASS_THRESHOLD:.0}% target"),
            )
            .with_details(serde_json::json!({ "coverage_percent": pct })),
            Some(pct) if pct >= FAIL_THRESHOLD => CheckResult::warning(
                CHECK_NAME,
                format!("coverage {pct:.1}% below the {PASS_THRESHOLD:.0}% target"),
            )
            .with_details(serde_json::json!({ "coverage_percent": pct })),
            Some(pct) => CheckResult::fail(
                CHECK_NAME,
                format!("coverage {pct:.1}% below the {FAIL_THRESHOLD:.0}% floor"),
                true,
            )
            .with_details(serde_json::json!({ "coverage_percent": pct })),
            None => CheckResult::warning(CHECK_NAME, "no coverage data available"),
        }
    }
}
