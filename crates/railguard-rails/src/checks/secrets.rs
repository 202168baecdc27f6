//! Check 2: exposed secrets (blocking).
//!
//! Scans source files for secret-shaped strings. A match is excluded when
//! it also matches the safe-test-key allowlist, so fixture keys like
//! `sk-test-...` never block a commit.

use regex::Regex;

use railguard_core::types::CheckResult;

use super::source_walk::{is_test_or_demo_file, source_files};
use super::{CheckContext, SafetyCheck};

const CHECK_NAME: &str = "exposed_secrets";

/// Secret-shaped patterns: provider key formats plus generic long
/// assignments to credential-named variables.
const SECRET_PATTERNS: &[(&str, &str)] = &[
    ("openai_key", r"sk-[A-Za-z0-9\-]{16,}"),
    ("aws_access_key", r"AKIA[0-9A-Z]{16}"),
    ("github_token", r"ghp_[A-Za-z0-9]{36}"),
    ("slack_token", r"xox[baprs]-[A-Za-z0-9\-]{10,}"),
    (
        "generic_assignment",
        r#"(?i)(?:api_key|apikey|secret|token|password|passwd)\s*[:=]\s*["'][^"']{20,}["']"#,
    ),
];

/// Allowlist: matches that also match one of these are test placeholders.
const SAFE_PATTERNS: &[&str] = &[
    r"(?i)sk-test",
    r"(?i)changeme",
    r"(?i)placeholder",
    r"(?i)example",
    r"(?i)your[-_]",
    r"(?i)dummy",
    r"(?i)xxx+",
];

pub struct ExposedSecretsCheck;

impl SafetyCheck for ExposedSecretsCheck {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    fn blocking(&self) -> bool {
        true
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let secret_regexes: Vec<(&str, Regex)> = SECRET_PATTERNS
            .iter()
            .filter_map(|(name, p)| Regex::new(p).ok().map(|re| (*name, re)))
            .collect();
        let safe_regexes: Vec<Regex> = SAFE_PATTERNS
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
                for (kind, re) in &secret_regexes {
                    let Some(m) = re.find(line) else { continue };
                    if safe_regexes.iter().any(|safe| safe.is_match(m.as_str())) {
                        continue;
                    }
                    findings.push(serde_json::json!({
                        "file": path.display().to_string(),
                        "line": line_no + 1,
                        "kind": kind,
                    }));
                }
            }
        }

        if findings.is_empty() {
            CheckResult::pass(CHECK_NAME, "no exposed secrets found")
        } else {
            CheckResult::fail(
                CHECK_NAME,
                format!("{} secret-shaped strings found", findings.len()),
                true,
            )
            .with_details(serde_json::json!({ "findings": findings }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches_secret(line: &str) -> bool {
        let secret_regexes: Vec<Regex> = SECRET_PATTERNS
            .iter()
            .filter_map(|(_, p)| Regex::new(p).ok())
            .collect();
        let safe_regexes: Vec<Regex> = SAFE_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();
        secret_regexes.iter().any(|re| {
            re.find(line)
                .is_some_and(|m| !safe_regexes.iter().any(|s| s.is_match(m.as_str())))
        })
    }

    #[test]
    fn test_keys_are_allowlisted() {
        assert!(!matches_secret(r#"api_key = "sk-test-1234567890abcdef""#));
        assert!(!matches_secret(r#"token = "CHANGEME_CHANGEME_CHANGEME""#));
    }

    #[test]
    fn real_shaped_keys_are_flagged() {
        assert!(matches_secret(r#"api_key = "sk-1234567890abcdef1234""#));
        assert!(matches_secret("AKIAIOSFODNN7REDACTED"));
    }
}
