//! Test-runner results file parsing, shared by the compliance-tests and
//! test-coverage checks.

use std::path::Path;

use serde::Deserialize;

/// JSON results file written by the external test runner.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TestResultsFile {
    pub success_rate: Option<f64>,
    pub coverage_percent: Option<f64>,
    pub tests_run: Option<u64>,
    pub tests_failed: Option<u64>,
}

impl TestResultsFile {
    /// Read and parse the results file.
    pub fn read(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("malformed results file {}: {e}", path.display()))
    }
}
