//! Repair / enforcement operation results.

use serde::{Deserialize, Serialize};

use crate::epoch_secs;

/// Outcome of a repair or enforcement operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepairStatus {
    Success,
    Failed,
    Partial,
    Blocked,
}

/// One result per repair/enforcement operation (disclaimer coverage,
/// neutralization sweep, forced encryption).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairResult {
    pub component: String,
    pub status: RepairStatus,
    pub details: serde_json::Value,
    pub issues_fixed: u32,
    pub timestamp: u64,
    pub error_message: Option<String>,
}

impl RepairResult {
    pub fn success(component: &str, issues_fixed: u32) -> Self {
        Self::new(component, RepairStatus::Success, issues_fixed, None)
    }

    pub fn partial(component: &str, issues_fixed: u32, error: impl Into<String>) -> Self {
        Self::new(component, RepairStatus::Partial, issues_fixed, Some(error.into()))
    }

    pub fn failed(component: &str, error: impl Into<String>) -> Self {
        Self::new(component, RepairStatus::Failed, 0, Some(error.into()))
    }

    fn new(
        component: &str,
        status: RepairStatus,
        issues_fixed: u32,
        error_message: Option<String>,
    ) -> Self {
        Self {
            component: component.to_string(),
            status,
            details: serde_json::Value::Null,
            issues_fixed,
            timestamp: epoch_secs(),
            error_message,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}
