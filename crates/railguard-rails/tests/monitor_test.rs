//! Monitoring hook tests: interaction rows, alert raising, daily rollup.

use railguard_core::config::MonitoringConfig;
use railguard_core::epoch_secs;
use railguard_core::types::{AlertLevel, OutputContext};
use railguard_rails::MonitoringHooks;
use railguard_storage::queries::{alerts, interactions, metrics};
use railguard_storage::DatabaseManager;

fn setup() -> DatabaseManager {
    DatabaseManager::open_in_memory().unwrap()
}

fn ctx() -> OutputContext {
    OutputContext {
        session_id: "sess-m".to_string(),
        user_id: Some("user-m".to_string()),
        model_name: "test-model".to_string(),
        feature_flags_used: vec!["citations".to_string()],
    }
}

const COMPLIANT: &str =
    "DISCLAIMER: informational purposes only, not legal advice. Deadlines vary.";

#[test]
fn compliant_interactions_raise_no_alerts() {
    let db = setup();
    let monitor = MonitoringHooks::new(&db, MonitoringConfig::default());

    let id = monitor
        .log_interaction("prompt", COMPLIANT, &ctx(), 12, false)
        .unwrap();
    assert_eq!(id.len(), 16);
    assert_eq!(db.with_conn(interactions::count).unwrap(), 1);
    assert_eq!(db.with_conn(alerts::unresolved_count).unwrap(), 0);
}

#[test]
fn missing_disclaimer_raises_a_warning_alert() {
    let db = setup();
    let monitor = MonitoringHooks::new(&db, MonitoringConfig::default());

    monitor
        .log_interaction("prompt", "Courts publish deadlines.", &ctx(), 5, false)
        .unwrap();

    let raised = db.with_conn(|c| alerts::unresolved(c, 10)).unwrap();
    assert_eq!(raised.len(), 1);
    assert_eq!(raised[0].level, AlertLevel::Warning);
}

#[test]
fn advice_without_disclaimer_is_critical() {
    let db = setup();
    let monitor = MonitoringHooks::new(&db, MonitoringConfig::default());

    // 1.0 - 0.5 (no disclaimer) - 0.3 (advice) = 0.2, below the 0.5 floor.
    monitor
        .log_interaction("prompt", "You should sue them.", &ctx(), 5, false)
        .unwrap();

    let raised = db.with_conn(|c| alerts::unresolved(c, 10)).unwrap();
    assert_eq!(raised.len(), 1);
    assert_eq!(raised[0].level, AlertLevel::Critical);
}

#[test]
fn advice_with_disclaimer_still_alerts_but_is_not_critical() {
    let db = setup();
    let monitor = MonitoringHooks::new(&db, MonitoringConfig::default());

    let response = format!("{COMPLIANT} You should sue them.");
    monitor
        .log_interaction("prompt", &response, &ctx(), 5, false)
        .unwrap();

    let raised = db.with_conn(|c| alerts::unresolved(c, 10)).unwrap();
    assert_eq!(raised.len(), 1);
    assert_eq!(raised[0].level, AlertLevel::Warning);
}

#[test]
fn interaction_rows_record_the_scoring_inputs() {
    let db = setup();
    let monitor = MonitoringHooks::new(&db, MonitoringConfig::default());
    monitor
        .log_interaction("prompt", COMPLIANT, &ctx(), 42, false)
        .unwrap();

    let rows = db.with_conn(|c| interactions::recent(c, 1)).unwrap();
    let row = &rows[0];
    assert!(row.has_disclaimer);
    assert!(!row.contains_advice);
    assert!((row.compliance_score - 1.0).abs() < 1e-9);
    assert_eq!(row.processing_time_ms, 42);
    assert_eq!(row.feature_flags_used, vec!["citations".to_string()]);
}

#[test]
fn rollup_aggregates_todays_interactions_and_alerts() {
    let db = setup();
    let monitor = MonitoringHooks::new(&db, MonitoringConfig::default());

    monitor
        .log_interaction("p1", COMPLIANT, &ctx(), 5, false)
        .unwrap();
    monitor
        .log_interaction("p2", "No disclaimer here.", &ctx(), 5, false)
        .unwrap();

    monitor.rollup_day(epoch_secs()).unwrap();

    let day: String = db
        .with_conn(|c| {
            c.query_row("SELECT day FROM daily_metrics", [], |row| row.get(0))
                .map_err(|e| railguard_core::errors::StorageError::SqliteError {
                    message: e.to_string(),
                })
        })
        .unwrap();
    let row = db.with_conn(|c| metrics::get_daily(c, &day)).unwrap().unwrap();
    assert_eq!(row.interaction_count, 2);
    assert_eq!(row.alert_count, 1);
    assert!((row.avg_compliance_score - 0.75).abs() < 1e-9);

    // Re-running the rollup overwrites rather than duplicates.
    monitor.rollup_day(epoch_secs()).unwrap();
    let count: u64 = db
        .with_conn(|c| {
            c.query_row("SELECT COUNT(*) FROM daily_metrics", [], |row| row.get(0))
                .map_err(|e| railguard_core::errors::StorageError::SqliteError {
                    message: e.to_string(),
                })
        })
        .unwrap();
    assert_eq!(count, 1);
}
