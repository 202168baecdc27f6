//! Queries for the daily_metrics rollup table.

use railguard_core::epoch_secs;
use railguard_core::errors::StorageError;
use rusqlite::{params, Connection};

/// A per-day rollup row.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyMetricRow {
    pub day: String,
    pub interaction_count: u64,
    pub avg_compliance_score: f64,
    pub alert_count: u64,
}

/// Upsert the rollup row for one day.
pub fn upsert_daily(conn: &Connection, row: &DailyMetricRow) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO daily_metrics (day, interaction_count, avg_compliance_score, alert_count, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(day) DO UPDATE SET
             interaction_count = excluded.interaction_count,
             avg_compliance_score = excluded.avg_compliance_score,
             alert_count = excluded.alert_count,
             updated_at = excluded.updated_at",
        params![
            row.day,
            row.interaction_count,
            row.avg_compliance_score,
            row.alert_count,
            epoch_secs()
        ],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Fetch the rollup row for one day, if present.
pub fn get_daily(conn: &Connection, day: &str) -> Result<Option<DailyMetricRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT day, interaction_count, avg_compliance_score, alert_count
             FROM daily_metrics WHERE day = ?1",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let mut rows = stmt
        .query_map(params![day], |row| {
            Ok(DailyMetricRow {
                day: row.get(0)?,
                interaction_count: row.get(1)?,
                avg_compliance_score: row.get(2)?,
                alert_count: row.get(3)?,
            })
        })
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    match rows.next() {
        Some(Ok(row)) => Ok(Some(row)),
        Some(Err(e)) => Err(StorageError::SqliteError {
            message: e.to_string(),
        }),
        None => Ok(None),
    }
}
