//! Monitoring configuration.

use serde::{Deserialize, Serialize};

/// Configuration for interaction logging and alerting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Path to the compliance metrics database.
    pub db_path: Option<String>,
    /// Compliance score below which an alert is raised. Default: 0.8.
    pub alert_threshold: Option<f64>,
    /// Score below which the alert is critical instead of warning.
    pub critical_threshold: Option<f64>,
}

impl MonitoringConfig {
    pub fn effective_db_path(&self) -> String {
        self.db_path
            .clone()
            .unwrap_or_else(|| "compliance_metrics.db".to_string())
    }

    pub fn effective_alert_threshold(&self) -> f64 {
        self.alert_threshold.unwrap_or(0.8)
    }

    pub fn effective_critical_threshold(&self) -> f64 {
        self.critical_threshold.unwrap_or(0.5)
    }
}
