//! Queries for the alerts table.

use railguard_core::errors::StorageError;
use railguard_core::types::{AlertLevel, ComplianceAlert};
use rusqlite::{params, Connection};

/// Insert one alert row.
pub fn insert_alert(conn: &Connection, alert: &ComplianceAlert) -> Result<(), StorageError> {
    let details_json =
        serde_json::to_string(&alert.details).unwrap_or_else(|_| "null".to_string());
    conn.execute(
        "INSERT INTO alerts (alert_id, timestamp, level, alert_type, message, details, resolved)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            alert.alert_id,
            alert.timestamp,
            alert.level.as_str(),
            alert.alert_type,
            alert.message,
            details_json,
            alert.resolved as i32
        ],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Mark an alert resolved. The single permitted mutation on this table.
pub fn resolve_alert(conn: &Connection, alert_id: &str) -> Result<bool, StorageError> {
    let changed = conn
        .execute(
            "UPDATE alerts SET resolved = 1 WHERE alert_id = ?1",
            params![alert_id],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(changed > 0)
}

/// Count unresolved alerts.
pub fn unresolved_count(conn: &Connection) -> Result<u64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM alerts WHERE resolved = 0",
        [],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}

/// Count alerts raised in a time window.
pub fn count_in_window(
    conn: &Connection,
    start: u64,
    end: u64,
) -> Result<u64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM alerts WHERE timestamp >= ?1 AND timestamp < ?2",
        params![start, end],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}

/// Fetch unresolved alerts, newest first.
pub fn unresolved(conn: &Connection, limit: u32) -> Result<Vec<ComplianceAlert>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT alert_id, timestamp, level, alert_type, message, details, resolved
             FROM alerts WHERE resolved = 0 ORDER BY timestamp DESC LIMIT ?1",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let rows = stmt
        .query_map(params![limit], |row| {
            let level: String = row.get(2)?;
            let details_json: String = row.get(5)?;
            Ok(ComplianceAlert {
                alert_id: row.get(0)?,
                timestamp: row.get(1)?,
                level: parse_level(&level),
                alert_type: row.get(3)?,
                message: row.get(4)?,
                details: serde_json::from_str(&details_json)
                    .unwrap_or(serde_json::Value::Null),
                resolved: row.get::<_, i32>(6)? != 0,
            })
        })
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

fn parse_level(s: &str) -> AlertLevel {
    match s {
        "critical" => AlertLevel::Critical,
        "emergency" => AlertLevel::Emergency,
        "warning" => AlertLevel::Warning,
        _ => AlertLevel::Info,
    }
}
