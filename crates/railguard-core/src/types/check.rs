//! Safety check results.

use serde::{Deserialize, Serialize};

use crate::epoch_secs;

/// Outcome status of a single safety check.
///
/// A check never transitions between states once run; a full battery run
/// produces a fixed-size list of immutable results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
    /// Suppressed without running (short-circuiting runners only).
    Blocked,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Warning => "warning",
            Self::Blocked => "blocked",
        }
    }
}

/// Result of one safety check. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_name: String,
    pub status: CheckStatus,
    pub message: String,
    /// Structured detail payload (offending matches, counts, paths).
    pub details: serde_json::Value,
    /// A failing blocking check prevents overall gate approval.
    pub blocking: bool,
    pub timestamp: u64,
    pub execution_time_ms: u64,
}

impl CheckResult {
    pub fn pass(check_name: &str, message: impl Into<String>) -> Self {
        Self::new(check_name, CheckStatus::Pass, message, false)
    }

    pub fn fail(check_name: &str, message: impl Into<String>, blocking: bool) -> Self {
        Self::new(check_name, CheckStatus::Fail, message, blocking)
    }

    pub fn warning(check_name: &str, message: impl Into<String>) -> Self {
        Self::new(check_name, CheckStatus::Warning, message, false)
    }

    pub fn blocked(check_name: &str, message: impl Into<String>) -> Self {
        Self::new(check_name, CheckStatus::Blocked, message, false)
    }

    fn new(
        check_name: &str,
        status: CheckStatus,
        message: impl Into<String>,
        blocking: bool,
    ) -> Self {
        Self {
            check_name: check_name.to_string(),
            status,
            message: message.into(),
            details: serde_json::Value::Null,
            blocking,
            timestamp: epoch_secs(),
            execution_time_ms: 0,
        }
    }

    /// Attach a structured detail payload.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// True when this result alone prevents gate approval.
    pub fn is_blocking_failure(&self) -> bool {
        self.status == CheckStatus::Fail && self.blocking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_failure_requires_both_flags() {
        assert!(CheckResult::fail("x", "boom", true).is_blocking_failure());
        assert!(!CheckResult::fail("x", "boom", false).is_blocking_failure());
        assert!(!CheckResult::warning("x", "meh").is_blocking_failure());
        assert!(!CheckResult::pass("x", "ok").is_blocking_failure());
    }
}
