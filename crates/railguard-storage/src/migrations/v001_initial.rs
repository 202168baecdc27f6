//! V001: Initial schema: interactions, daily_metrics, alerts.

pub const MIGRATION_SQL: &str = r#"
-- Interactions: append-only log, one row per AI interaction.
CREATE TABLE IF NOT EXISTS interactions (
    interaction_id TEXT PRIMARY KEY,
    timestamp INTEGER NOT NULL,
    user_id TEXT,
    session_id TEXT NOT NULL,
    model_name TEXT NOT NULL,
    prompt_hash TEXT NOT NULL,
    response_hash TEXT NOT NULL,
    response_length INTEGER NOT NULL,
    contains_advice INTEGER NOT NULL DEFAULT 0,
    has_disclaimer INTEGER NOT NULL DEFAULT 0,
    compliance_score REAL NOT NULL,
    processing_time_ms INTEGER NOT NULL DEFAULT 0,
    feature_flags_used TEXT NOT NULL DEFAULT '[]',
    error_occurred INTEGER NOT NULL DEFAULT 0
) STRICT;

CREATE INDEX IF NOT EXISTS idx_interactions_time
    ON interactions(timestamp DESC);
CREATE INDEX IF NOT EXISTS idx_interactions_session
    ON interactions(session_id);
CREATE INDEX IF NOT EXISTS idx_interactions_low_score
    ON interactions(compliance_score) WHERE compliance_score < 0.8;

-- Daily metric rollups: upsert per day.
CREATE TABLE IF NOT EXISTS daily_metrics (
    day TEXT PRIMARY KEY,
    interaction_count INTEGER NOT NULL DEFAULT 0,
    avg_compliance_score REAL NOT NULL DEFAULT 0.0,
    alert_count INTEGER NOT NULL DEFAULT 0,
    updated_at INTEGER NOT NULL
) STRICT;

-- Alerts: append-only; `resolved` is the only mutable column.
CREATE TABLE IF NOT EXISTS alerts (
    alert_id TEXT PRIMARY KEY,
    timestamp INTEGER NOT NULL,
    level TEXT NOT NULL,
    alert_type TEXT NOT NULL,
    message TEXT NOT NULL,
    details TEXT NOT NULL DEFAULT 'null',
    resolved INTEGER NOT NULL DEFAULT 0
) STRICT;

CREATE INDEX IF NOT EXISTS idx_alerts_unresolved
    ON alerts(timestamp DESC) WHERE resolved = 0;
"#;
