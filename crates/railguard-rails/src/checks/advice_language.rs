//! Check 3: advice language (blocking).
//!
//! Scans source files for a subset of the advice-phrase patterns; comment
//! lines and test/demo paths are excluded.

use regex::Regex;

use railguard_core::types::CheckResult;

use super::source_walk::{is_comment_line, is_test_or_demo_file, source_files};
use super::{CheckContext, SafetyCheck};

const CHECK_NAME: &str = "advice_language";

/// Advice phrases that must not appear in user-facing source strings.
/// A subset of the neutralizer table: the high-signal imperative forms.
const ADVICE_PHRASES: &[&str] = &[
    r"(?i)\byou should\b",
    r"(?i)\byou must\b",
    r"(?i)\b(?:i|we) recommend\b",
    r"(?i)\b(?:i|we) advise\b",
    r"(?i)\byou have a strong case\b",
    r"(?i)\byou will win\b",
];

pub struct AdviceLanguageCheck;

impl SafetyCheck for AdviceLanguageCheck {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    fn blocking(&self) -> bool {
        true
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let regexes: Vec<Regex> = ADVICE_PHRASES
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();

        let mut findings = Vec::new();
        for path in source_files(ctx) {
            if is_test_or_demo_file(&path, ctx) {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            for (line_no, line) in content.lines().enumerate() {
                if is_comment_line(line) {
                    continue;
                }
                for re in &regexes {
                    if let Some(m) = re.find(line) {
                        findings.push(serde_json::json!({
                            "file": path.display().to_string(),
                            "line": line_no + 1,
                            "phrase": m.as_str(),
                        }));
                    }
                }
            }
        }

        if findings.is_empty() {
            CheckResult::pass(CHECK_NAME, "no advice language found")
        } else {
            CheckResult::fail(
                CHECK_NAME,
                format!("{} advice phrases found in source", findings.len()),
                true,
            )
            .with_details(serde_json::json!({ "findings": findings }))
        }
    }
}
