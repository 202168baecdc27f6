//! Monitoring records: AI interactions and compliance alerts.

use serde::{Deserialize, Serialize};

/// Severity of a compliance alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
    Emergency,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Emergency => "emergency",
        }
    }
}

/// A compliance alert raised by the monitoring hooks.
/// Append-only; `resolved` is the only mutable field, and alerts are
/// never auto-resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceAlert {
    pub alert_id: String,
    pub timestamp: u64,
    pub level: AlertLevel,
    pub alert_type: String,
    pub message: String,
    pub details: serde_json::Value,
    pub resolved: bool,
}

/// One append-only row per AI interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Content hash of the interaction (prompt + response + timestamp).
    pub interaction_id: String,
    pub timestamp: u64,
    pub user_id: Option<String>,
    pub session_id: String,
    pub model_name: String,
    pub prompt_hash: String,
    pub response_hash: String,
    pub response_length: u64,
    pub contains_advice: bool,
    pub has_disclaimer: bool,
    /// Clamped to [0.0, 1.0].
    pub compliance_score: f64,
    pub processing_time_ms: u64,
    pub feature_flags_used: Vec<String>,
    pub error_occurred: bool,
}
