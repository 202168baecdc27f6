//! Check 6: code quality heuristics (never blocking).
//!
//! Long lines and oversized files. Reported issues are capped at 20; more
//! than 10 issues downgrades the result to a warning.

use railguard_core::types::CheckResult;

use super::source_walk::source_files;
use super::{CheckContext, SafetyCheck};

const CHECK_NAME: &str = "code_quality";

/// Cap on reported issues.
const MAX_REPORTED: usize = 20;

/// Issue count above which the result is a warning.
const WARNING_THRESHOLD: usize = 10;

pub struct CodeQualityCheck;

impl SafetyCheck for CodeQualityCheck {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    fn blocking(&self) -> bool {
        false
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let max_line = ctx.scan.effective_max_line_length();
        let max_lines = ctx.scan.effective_max_file_lines();

        let mut issues = Vec::new();
        let mut total = 0usize;
        for path in source_files(ctx) {
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            let line_count = content.lines().count();
            if line_count > max_lines {
                total += 1;
                if issues.len() < MAX_REPORTED {
                    issues.push(serde_json::json!({
                        "file": path.display().to_string(),
                        "issue": format!("{line_count} lines (max {max_lines})"),
                    }));
                }
            }
            for (line_no, line) in content.lines().enumerate() {
                if line.chars().count() > max_line {
                    total += 1;
                    if issues.len() < MAX_REPORTED {
                        issues.push(serde_json::json!({
                            "file": path.display().to_string(),
                            "line": line_no + 1,
                            "issue": format!("line exceeds {max_line} chars"),
                        }));
                    }
                }
            }
        }

        let details = serde_json::json!({ "total_issues": total, "issues": issues });
        if total > WARNING_THRESHOLD {
            CheckResult::warning(CHECK_NAME, format!("{total} code quality issues"))
                .with_details(details)
        } else {
            CheckResult::pass(CHECK_NAME, format!("{total} code quality issues"))
                .with_details(details)
        }
    }
}
