//! Source-scan configuration for the pre-commit checks.

use serde::{Deserialize, Serialize};

/// Configuration for the file-scanning checks (secrets, advice language,
/// code quality) and the external test runner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Directories excluded from source scans (relative names).
    pub exclude_dirs: Vec<String>,
    /// Filename fragments marking test/demo files, excluded from the
    /// secret and advice scans.
    pub exclude_file_patterns: Vec<String>,
    /// Maximum allowed line length before a code-quality issue is raised.
    pub max_line_length: Option<usize>,
    /// Maximum allowed file length in lines.
    pub max_file_lines: Option<usize>,
    /// Test runner invocation, argv form (`["cargo", "test"]`-like).
    pub test_command: Vec<String>,
    /// Timeout for the test runner subprocess, in seconds.
    pub test_timeout_secs: Option<u64>,
    /// JSON results file written by the test runner
    /// (`{"success_rate": .., "coverage_percent": ..}`).
    pub results_file: Option<String>,
}

impl ScanConfig {
    /// Effective excluded directories, defaulting to the standard set.
    pub fn effective_exclude_dirs(&self) -> Vec<String> {
        if self.exclude_dirs.is_empty() {
            ["target", "node_modules", ".git", "backups", "demos"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.exclude_dirs.clone()
        }
    }

    /// Effective test/demo filename fragments.
    pub fn effective_exclude_file_patterns(&self) -> Vec<String> {
        if self.exclude_file_patterns.is_empty() {
            ["test_", "_test", "demo_", "_demo", "example", "fixture"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.exclude_file_patterns.clone()
        }
    }

    pub fn effective_max_line_length(&self) -> usize {
        self.max_line_length.unwrap_or(120)
    }

    pub fn effective_max_file_lines(&self) -> usize {
        self.max_file_lines.unwrap_or(1000)
    }

    pub fn effective_test_timeout_secs(&self) -> u64 {
        self.test_timeout_secs.unwrap_or(120)
    }

    pub fn effective_results_file(&self) -> String {
        self.results_file
            .clone()
            .unwrap_or_else(|| "test_results.json".to_string())
    }
}
