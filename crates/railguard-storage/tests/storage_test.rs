//! Storage round-trip tests against an in-memory database.

use railguard_core::types::{AlertLevel, ComplianceAlert, InteractionRecord};
use railguard_storage::queries::{alerts, interactions, metrics};
use railguard_storage::DatabaseManager;

fn sample_record(id: &str, score: f64, ts: u64) -> InteractionRecord {
    InteractionRecord {
        interaction_id: id.to_string(),
        timestamp: ts,
        user_id: Some("user-1".to_string()),
        session_id: "sess-1".to_string(),
        model_name: "demo-model".to_string(),
        prompt_hash: "abc".to_string(),
        response_hash: "def".to_string(),
        response_length: 42,
        contains_advice: false,
        has_disclaimer: true,
        compliance_score: score,
        processing_time_ms: 12,
        feature_flags_used: vec!["new_pipeline".to_string()],
        error_occurred: false,
    }
}

#[test]
fn interaction_roundtrip() {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_conn(|conn| interactions::insert_interaction(conn, &sample_record("i1", 0.95, 100)))
        .unwrap();

    let rows = db.with_conn(|conn| interactions::recent(conn, 10)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].interaction_id, "i1");
    assert_eq!(rows[0].feature_flags_used, vec!["new_pipeline"]);
    assert!(rows[0].has_disclaimer);
}

#[test]
fn interactions_are_append_only() {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_conn(|conn| interactions::insert_interaction(conn, &sample_record("i1", 0.9, 100)))
        .unwrap();
    // Same primary key must be rejected, not silently replaced.
    let dup = db
        .with_conn(|conn| interactions::insert_interaction(conn, &sample_record("i1", 0.1, 200)));
    assert!(dup.is_err());
    assert_eq!(db.with_conn(interactions::count).unwrap(), 1);
}

#[test]
fn day_stats_aggregates_window() {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_conn(|conn| {
        interactions::insert_interaction(conn, &sample_record("a", 1.0, 1_000))?;
        interactions::insert_interaction(conn, &sample_record("b", 0.5, 2_000))?;
        interactions::insert_interaction(conn, &sample_record("c", 0.0, 90_000))
    })
    .unwrap();

    let (count, avg) = db
        .with_conn(|conn| interactions::day_stats(conn, 0, 86_400))
        .unwrap();
    assert_eq!(count, 2);
    assert!((avg - 0.75).abs() < 1e-9);
}

#[test]
fn alert_resolution_is_the_only_mutation() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let alert = ComplianceAlert {
        alert_id: "al-1".to_string(),
        timestamp: 123,
        level: AlertLevel::Critical,
        alert_type: "low_compliance_score".to_string(),
        message: "score 0.3 below threshold".to_string(),
        details: serde_json::json!({"score": 0.3}),
        resolved: false,
    };
    db.with_conn(|conn| alerts::insert_alert(conn, &alert)).unwrap();
    assert_eq!(db.with_conn(alerts::unresolved_count).unwrap(), 1);

    let resolved = db.with_conn(|conn| alerts::resolve_alert(conn, "al-1")).unwrap();
    assert!(resolved);
    assert_eq!(db.with_conn(alerts::unresolved_count).unwrap(), 0);

    // Resolving a missing alert reports false.
    let missing = db.with_conn(|conn| alerts::resolve_alert(conn, "nope")).unwrap();
    assert!(!missing);
}

#[test]
fn alert_level_roundtrips_through_text() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let alert = ComplianceAlert {
        alert_id: "al-2".to_string(),
        timestamp: 456,
        level: AlertLevel::Warning,
        alert_type: "missing_disclaimer".to_string(),
        message: "response shipped without disclaimer".to_string(),
        details: serde_json::Value::Null,
        resolved: false,
    };
    db.with_conn(|conn| alerts::insert_alert(conn, &alert)).unwrap();
    let rows = db.with_conn(|conn| alerts::unresolved(conn, 10)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].level, AlertLevel::Warning);
}

#[test]
fn daily_metrics_upsert_overwrites() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let mut row = metrics::DailyMetricRow {
        day: "2026-08-23".to_string(),
        interaction_count: 10,
        avg_compliance_score: 0.9,
        alert_count: 1,
    };
    db.with_conn(|conn| metrics::upsert_daily(conn, &row)).unwrap();

    row.interaction_count = 25;
    row.alert_count = 3;
    db.with_conn(|conn| metrics::upsert_daily(conn, &row)).unwrap();

    let stored = db
        .with_conn(|conn| metrics::get_daily(conn, "2026-08-23"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.interaction_count, 25);
    assert_eq!(stored.alert_count, 3);
}

#[test]
fn migrations_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metrics.db");
    {
        let db = DatabaseManager::open(&path).unwrap();
        db.with_conn(|conn| {
            interactions::insert_interaction(conn, &sample_record("i1", 0.9, 100))
        })
        .unwrap();
    }
    // Reopening runs migrations again; data survives.
    let db = DatabaseManager::open(&path).unwrap();
    assert_eq!(db.with_conn(interactions::count).unwrap(), 1);
}
